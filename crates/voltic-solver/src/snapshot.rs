//! Per-point result records.

use voltic_core::NodeId;

/// The independent variable of one analysis point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepParam {
    /// Transient time in seconds.
    Time(f64),
    /// Swept voltage-source value in volts.
    VSweep(f64),
    /// Swept current-source value in amperes.
    ISweep(f64),
}

impl SweepParam {
    /// The numeric value of the parameter.
    pub fn value(self) -> f64 {
        match self {
            SweepParam::Time(v) | SweepParam::VSweep(v) | SweepParam::ISweep(v) => v,
        }
    }

    /// Unit string for display.
    pub fn unit(self) -> &'static str {
        match self {
            SweepParam::Time(_) => "s",
            SweepParam::VSweep(_) => "V",
            SweepParam::ISweep(_) => "A",
        }
    }
}

/// Outcome of one analysis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// Solved successfully.
    Ok,
    /// The matrix was singular at this point.
    Singular,
    /// The circuit has no datum node.
    GroundMissing,
    /// Cancellation was observed before this point was solved.
    Cancelled,
}

/// The full result record at one time or sweep point.
///
/// Node-voltage entries are sorted by node id and include the datum at 0 V;
/// element-current entries follow element insertion order. Current reference
/// direction is from `node_pos` to `node_neg` through the element.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The time or sweep value this record belongs to.
    pub param: SweepParam,
    /// `(node, voltage)` pairs sorted by node id.
    pub nodes: Vec<(NodeId, f64)>,
    /// `(element name, current)` pairs in element insertion order.
    pub currents: Vec<(String, f64)>,
    /// Outcome of the solve at this point.
    pub status: SnapshotStatus,
}

impl Snapshot {
    /// A record for a point that failed to solve; carries no data.
    pub fn failed(param: SweepParam, status: SnapshotStatus) -> Self {
        Self {
            param,
            nodes: Vec::new(),
            currents: Vec::new(),
            status,
        }
    }

    /// Whether this point solved successfully.
    pub fn is_ok(&self) -> bool {
        self.status == SnapshotStatus::Ok
    }

    /// Voltage at a node; 0 for the datum and for unknown labels.
    pub fn voltage(&self, node: NodeId) -> f64 {
        self.nodes
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// Current through a named element; 0 if the name is unknown.
    pub fn current(&self, name: &str) -> f64 {
        self.currents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, i)| *i)
            .unwrap_or(0.0)
    }
}

/// Receives snapshots as the driver produces them.
///
/// Implemented for any `FnMut(Snapshot)`, so a closure collecting into a
/// `Vec` or printing to a terminal both work.
pub trait SnapshotSink {
    /// Accept the next snapshot.
    fn emit(&mut self, snapshot: Snapshot);
}

impl<F: FnMut(Snapshot)> SnapshotSink for F {
    fn emit(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}
