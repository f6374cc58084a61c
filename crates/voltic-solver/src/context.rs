//! Per-analysis solver state: history, scratch matrices, and the
//! assemble-solve-extract step.

use nalgebra::DVector;
use voltic_core::mna::MnaSystem;
use voltic_core::{Circuit, ElementKind, NodeId, NodeIndex};

use crate::error::Result;
use crate::linear::solve_dense;
use crate::snapshot::{Snapshot, SnapshotStatus, SweepParam};

/// Conductance used for a capacitor at DC (`h == 0`).
///
/// A true open circuit would drop the capacitor's entries entirely; the
/// vanishing conductance keeps the matrix topology intact without injecting
/// any history current.
pub const CAPACITOR_DC_CONDUCTANCE: f64 = 1e-12;

/// Owns everything one analysis run needs: the node index, the voltage and
/// inductor-current history carried between timesteps, and the scratch MNA
/// system reused across assemblies.
///
/// Created at analysis start and dropped at the end; the drivers never share
/// a context between runs.
#[derive(Debug)]
pub struct SolverContext {
    index: NodeIndex,
    /// Node voltages at the previous accepted timestep, by node row.
    v_prev: DVector<f64>,
    /// Inductor branch currents at the previous accepted timestep.
    i_prev: Vec<f64>,
    /// Scratch system, re-zeroed before each assembly.
    mna: MnaSystem,
}

impl SolverContext {
    /// Build a context for a circuit, with all history zeroed.
    pub fn new(circuit: &Circuit) -> Self {
        let index = NodeIndex::from_circuit(circuit);
        let mna = MnaSystem::new(
            index.num_nodes(),
            index.num_vsources(),
            index.num_inductors(),
        );
        Self {
            v_prev: DVector::zeros(index.num_nodes()),
            i_prev: vec![0.0; index.num_inductors()],
            index,
            mna,
        }
    }

    /// The node-to-row index for this analysis.
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Zero the voltage and current history (start of a transient run).
    pub fn reset_history(&mut self) {
        self.v_prev.fill(0.0);
        self.i_prev.iter_mut().for_each(|i| *i = 0.0);
    }

    /// Assemble and solve one analysis point, returning its snapshot.
    ///
    /// `h > 0` selects the backward-Euler companion models; `h == 0` selects
    /// DC mode (capacitors open, inductors short). On success the history is
    /// advanced so the next call sees this point as the previous timestep.
    pub fn step(
        &mut self,
        circuit: &Circuit,
        t: f64,
        h: f64,
        param: SweepParam,
    ) -> Result<Snapshot> {
        if self.index.num_nodes() == 0 {
            // Nothing but the datum: the trivial solution, no solve needed.
            return Ok(self.trivial_snapshot(circuit, t, param));
        }

        self.assemble(circuit, t, h);
        let x = solve_dense(self.mna.matrix(), self.mna.rhs())?;
        let snapshot = self.extract(circuit, &x, t, h, param);
        self.advance(&x);
        Ok(snapshot)
    }

    /// Stamp every element for time `t` and timestep `h`.
    fn assemble(&mut self, circuit: &Circuit, t: f64, h: f64) {
        self.mna.clear();
        let mut vs_idx = 0;
        let mut ind_idx = 0;

        for element in circuit.elements() {
            let i1 = self.index.row(element.node_pos());
            let i2 = self.index.row(element.node_neg());

            match element.kind() {
                ElementKind::Resistor { resistance } => {
                    self.mna.stamp_conductance(i1, i2, 1.0 / resistance);
                }
                ElementKind::Capacitor { capacitance } => {
                    if h > 0.0 {
                        let gc = capacitance / h;
                        let ieq = gc * (self.prev_voltage(i1) - self.prev_voltage(i2));
                        self.mna.stamp_conductance(i1, i2, gc);
                        // History current charges node_pos.
                        self.mna.stamp_current_source(i2, i1, ieq);
                    } else {
                        self.mna
                            .stamp_conductance(i1, i2, CAPACITOR_DC_CONDUCTANCE);
                    }
                }
                ElementKind::Inductor { inductance } => {
                    let r_eq = if h > 0.0 { inductance / h } else { 0.0 };
                    self.mna
                        .stamp_inductor_branch(i1, i2, ind_idx, r_eq, self.i_prev[ind_idx]);
                    ind_idx += 1;
                }
                ElementKind::VoltageSource { waveform } => {
                    self.mna
                        .stamp_voltage_source(i1, i2, vs_idx, waveform.value_at(t));
                    vs_idx += 1;
                }
                ElementKind::CurrentSource { waveform } => {
                    self.mna.stamp_current_source(i1, i2, waveform.value_at(t));
                }
            }
        }
    }

    /// Build the snapshot for a solved point.
    fn extract(
        &self,
        circuit: &Circuit,
        x: &DVector<f64>,
        t: f64,
        h: f64,
        param: SweepParam,
    ) -> Snapshot {
        let mut nodes = Vec::with_capacity(self.index.num_nodes() + 1);
        nodes.push((NodeId::GROUND, 0.0));
        for (row, &node) in self.index.active_nodes().iter().enumerate() {
            nodes.push((node, x[row]));
        }

        let voltage = |row: Option<usize>| row.map(|r| x[r]).unwrap_or(0.0);

        let mut currents = Vec::with_capacity(circuit.len());
        let mut vs_idx = 0;
        let mut ind_idx = 0;
        for element in circuit.elements() {
            let i1 = self.index.row(element.node_pos());
            let i2 = self.index.row(element.node_neg());
            let dv = voltage(i1) - voltage(i2);

            let current = match element.kind() {
                ElementKind::Resistor { resistance } => dv / resistance,
                ElementKind::Capacitor { capacitance } => {
                    if h > 0.0 {
                        let dv_prev = self.prev_voltage(i1) - self.prev_voltage(i2);
                        capacitance / h * (dv - dv_prev)
                    } else {
                        0.0
                    }
                }
                ElementKind::Inductor { .. } => {
                    let i = x[self.index.inductor_row(ind_idx)];
                    ind_idx += 1;
                    i
                }
                ElementKind::VoltageSource { .. } => {
                    let i = x[self.index.vsource_row(vs_idx)];
                    vs_idx += 1;
                    i
                }
                ElementKind::CurrentSource { waveform } => waveform.value_at(t),
            };
            currents.push((element.name().to_string(), current));
        }

        Snapshot {
            param,
            nodes,
            currents,
            status: SnapshotStatus::Ok,
        }
    }

    /// Carry this point's solution into the history.
    fn advance(&mut self, x: &DVector<f64>) {
        self.v_prev.copy_from(&x.rows(0, self.index.num_nodes()));
        for (k, i) in self.i_prev.iter_mut().enumerate() {
            *i = x[self.index.inductor_row(k)];
        }
    }

    /// Snapshot for a circuit whose every terminal sits on the datum.
    fn trivial_snapshot(&self, circuit: &Circuit, t: f64, param: SweepParam) -> Snapshot {
        let currents = circuit
            .elements()
            .map(|e| {
                let current = match e.kind() {
                    ElementKind::CurrentSource { waveform } => waveform.value_at(t),
                    _ => 0.0,
                };
                (e.name().to_string(), current)
            })
            .collect();

        Snapshot {
            param,
            nodes: vec![(NodeId::GROUND, 0.0)],
            currents,
            status: SnapshotStatus::Ok,
        }
    }

    fn prev_voltage(&self, row: Option<usize>) -> f64 {
        row.map(|r| self.v_prev[r]).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltic_core::{Element, Waveform};

    fn divider() -> Circuit {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(10.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            1000.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R2",
            1000.0,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();
        c
    }

    #[test]
    fn test_divider_dc_point() {
        let circuit = divider();
        let mut ctx = SolverContext::new(&circuit);
        let snap = ctx
            .step(&circuit, 0.0, 0.0, SweepParam::Time(0.0))
            .unwrap();

        assert!((snap.voltage(NodeId::new(1)) - 10.0).abs() < 1e-12);
        assert!((snap.voltage(NodeId::new(2)) - 5.0).abs() < 1e-12);
        assert!((snap.current("R1") - 0.005).abs() < 1e-12);
        assert!((snap.current("V1") + 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_ordering() {
        let circuit = divider();
        let mut ctx = SolverContext::new(&circuit);
        let snap = ctx
            .step(&circuit, 0.0, 0.0, SweepParam::Time(0.0))
            .unwrap();

        let node_ids: Vec<u32> = snap.nodes.iter().map(|(n, _)| n.as_u32()).collect();
        assert_eq!(node_ids, vec![0, 1, 2]);

        let names: Vec<&str> = snap.currents.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["V1", "R1", "R2"]);
    }

    #[test]
    fn test_inductor_short_at_dc() {
        // V1 -- R -- L -- ground: at DC the inductor is a short, so the
        // branch current is V/R and the voltage across L is 0.
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(5.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            100.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::inductor(
            "L1",
            1e-3,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();

        let mut ctx = SolverContext::new(&c);
        let snap = ctx.step(&c, 0.0, 0.0, SweepParam::Time(0.0)).unwrap();

        assert!((snap.current("L1") - 0.05).abs() < 1e-9);
        assert!(snap.voltage(NodeId::new(2)).abs() < 1e-9);
    }

    #[test]
    fn test_capacitor_open_at_dc() {
        // V1 -- R -- C to ground: no DC path beyond the capacitor, so the
        // top plate floats up to the source voltage and i_C is 0.
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(5.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            1000.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::capacitor(
            "C1",
            1e-6,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();

        let mut ctx = SolverContext::new(&c);
        let snap = ctx.step(&c, 0.0, 0.0, SweepParam::Time(0.0)).unwrap();

        assert!((snap.voltage(NodeId::new(2)) - 5.0).abs() < 1e-6);
        assert_eq!(snap.current("C1"), 0.0);
    }

    #[test]
    fn test_trivial_circuit() {
        // Only the datum appears: trivial solution, declared success.
        let mut c = Circuit::new();
        c.add_element(Element::current_source(
            "I1",
            Waveform::dc(0.003),
            NodeId::GROUND,
            NodeId::GROUND,
        ))
        .unwrap();

        let mut ctx = SolverContext::new(&c);
        let snap = ctx.step(&c, 0.0, 0.0, SweepParam::Time(0.0)).unwrap();

        assert!(snap.is_ok());
        assert_eq!(snap.nodes, vec![(NodeId::GROUND, 0.0)]);
        assert_eq!(snap.current("I1"), 0.003);
    }

    #[test]
    fn test_history_advances() {
        // One BE step of an RC charge: the second step must see the first
        // step's capacitor voltage as history.
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(1.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            1000.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::capacitor(
            "C1",
            1e-6,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();

        let h = 1e-4;
        let mut ctx = SolverContext::new(&c);
        let s0 = ctx.step(&c, 0.0, h, SweepParam::Time(0.0)).unwrap();
        let s1 = ctx.step(&c, h, h, SweepParam::Time(h)).unwrap();

        // BE recurrence: v_k = (v_{k-1} + (h/tau) * V) / (1 + h/tau)
        let a = h / 1e-3;
        let v0 = a / (1.0 + a);
        let v1 = (v0 + a) / (1.0 + a);
        assert!((s0.voltage(NodeId::new(2)) - v0).abs() < 1e-12);
        assert!((s1.voltage(NodeId::new(2)) - v1).abs() < 1e-12);
    }
}
