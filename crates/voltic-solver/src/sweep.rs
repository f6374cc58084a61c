//! DC sweep analysis drivers.
//!
//! A sweep steps one named DC source through a range, solving the DC
//! operating point at each value (capacitors open, inductors short). The
//! swept source is mutated in place, which is why the drivers take the
//! circuit mutably; its original value is restored on every exit path,
//! including error and cancellation.

use voltic_core::{Circuit, Element};

use crate::cancel::CancelToken;
use crate::context::SolverContext;
use crate::error::{Error, Result};
use crate::snapshot::{Snapshot, SnapshotSink, SnapshotStatus, SweepParam};

/// DC sweep parameters.
#[derive(Debug, Clone)]
pub struct DcSweepParams {
    /// Name of the DC source to sweep.
    pub source: String,
    /// Start value.
    pub start: f64,
    /// Stop value.
    pub stop: f64,
    /// Step increment; nonzero, same sign as `stop - start`.
    pub step: f64,
}

impl DcSweepParams {
    /// Create sweep parameters.
    pub fn new(source: impl Into<String>, start: f64, stop: f64, step: f64) -> Self {
        Self {
            source: source.into(),
            start,
            stop,
            step,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.step == 0.0 {
            return Err(Error::BadParameters(
                "sweep step cannot be zero".to_string(),
            ));
        }
        if (self.stop - self.start) * self.step < 0.0 {
            return Err(Error::BadParameters(format!(
                "step {} runs away from the range {}..{}",
                self.step, self.start, self.stop
            )));
        }
        Ok(())
    }
}

/// Sweep a DC voltage source, pushing one snapshot per point.
pub fn run_dc_sweep_v(
    circuit: &mut Circuit,
    params: &DcSweepParams,
    sink: &mut dyn SnapshotSink,
    cancel: &CancelToken,
) -> Result<()> {
    run_dc_sweep(circuit, params, sink, cancel, SweptKind::Voltage)
}

/// Sweep a DC current source, pushing one snapshot per point.
pub fn run_dc_sweep_i(
    circuit: &mut Circuit,
    params: &DcSweepParams,
    sink: &mut dyn SnapshotSink,
    cancel: &CancelToken,
) -> Result<()> {
    run_dc_sweep(circuit, params, sink, cancel, SweptKind::Current)
}

#[derive(Clone, Copy)]
enum SweptKind {
    Voltage,
    Current,
}

impl SweptKind {
    fn name(self) -> &'static str {
        match self {
            SweptKind::Voltage => "voltage",
            SweptKind::Current => "current",
        }
    }

    fn matches(self, element: &Element) -> bool {
        match self {
            SweptKind::Voltage => element.is_voltage_source(),
            SweptKind::Current => element.is_current_source(),
        }
    }

    fn param(self, value: f64) -> SweepParam {
        match self {
            SweptKind::Voltage => SweepParam::VSweep(value),
            SweptKind::Current => SweepParam::ISweep(value),
        }
    }
}

fn run_dc_sweep(
    circuit: &mut Circuit,
    params: &DcSweepParams,
    sink: &mut dyn SnapshotSink,
    cancel: &CancelToken,
    kind: SweptKind,
) -> Result<()> {
    params.validate()?;
    if !circuit.has_ground() {
        sink.emit(Snapshot::failed(
            kind.param(params.start),
            SnapshotStatus::GroundMissing,
        ));
        return Err(Error::GroundMissing);
    }

    let no_such_source = || Error::NoSuchSource {
        kind: kind.name(),
        name: params.source.clone(),
    };
    let is_dc_source = circuit
        .find_element(&params.source)
        .is_some_and(|e| kind.matches(e) && e.waveform().is_some_and(|w| w.is_dc()));
    if !is_dc_source {
        return Err(no_such_source());
    }
    let original = circuit.source_value(&params.source).ok_or_else(no_such_source)?;

    let result = sweep_loop(circuit, params, sink, cancel, kind);

    // Restore the swept source on every exit path.
    let _ = circuit.set_source_value(&params.source, original);

    result
}

fn sweep_loop(
    circuit: &mut Circuit,
    params: &DcSweepParams,
    sink: &mut dyn SnapshotSink,
    cancel: &CancelToken,
    kind: SweptKind,
) -> Result<()> {
    let mut ctx = SolverContext::new(circuit);

    let mut point = 0usize;
    loop {
        let value = params.start + point as f64 * params.step;
        let in_range = if params.step > 0.0 {
            value <= params.stop + params.step / 2.0
        } else {
            value >= params.stop + params.step / 2.0
        };
        if !in_range {
            break;
        }

        if cancel.is_cancelled() {
            sink.emit(Snapshot::failed(kind.param(value), SnapshotStatus::Cancelled));
            return Err(Error::Cancelled);
        }

        circuit
            .set_source_value(&params.source, value)
            .map_err(|e| Error::BadParameters(e.to_string()))?;

        match ctx.step(circuit, 0.0, 0.0, kind.param(value)) {
            Ok(snapshot) => sink.emit(snapshot),
            Err(Error::SingularCircuit) => {
                sink.emit(Snapshot::failed(kind.param(value), SnapshotStatus::Singular));
                return Err(Error::SingularCircuit);
            }
            Err(e) => return Err(e),
        }

        point += 1;
    }

    Ok(())
}

/// Run a voltage sweep and collect all snapshots.
pub fn collect_dc_sweep_v(circuit: &mut Circuit, params: &DcSweepParams) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();
    let mut sink = |s: Snapshot| snapshots.push(s);
    run_dc_sweep_v(circuit, params, &mut sink, &CancelToken::new())?;
    Ok(snapshots)
}

/// Run a current sweep and collect all snapshots.
pub fn collect_dc_sweep_i(circuit: &mut Circuit, params: &DcSweepParams) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();
    let mut sink = |s: Snapshot| snapshots.push(s);
    run_dc_sweep_i(circuit, params, &mut sink, &CancelToken::new())?;
    Ok(snapshots)
}
