//! Transient analysis driver.

use voltic_core::Circuit;

use crate::cancel::CancelToken;
use crate::context::SolverContext;
use crate::error::{Error, Result};
use crate::snapshot::{Snapshot, SnapshotSink, SnapshotStatus, SweepParam};

/// Transient analysis parameters.
#[derive(Debug, Clone)]
pub struct TransientParams {
    /// Start time (s).
    pub t0: f64,
    /// Stop time (s); the half-step guard may admit one point past it.
    pub t1: f64,
    /// Fixed timestep (s), strictly positive.
    pub h: f64,
}

impl TransientParams {
    /// Create parameters for a run from `t0` to `t1` with step `h`.
    pub fn new(t0: f64, t1: f64, h: f64) -> Self {
        Self { t0, t1, h }
    }

    fn validate(&self) -> Result<()> {
        if !(self.h > 0.0) {
            return Err(Error::BadParameters(format!(
                "time step must be positive, got {}",
                self.h
            )));
        }
        if self.t1 < self.t0 {
            return Err(Error::BadParameters(format!(
                "end time {} precedes start time {}",
                self.t1, self.t0
            )));
        }
        Ok(())
    }
}

/// Run a transient simulation, pushing one snapshot per timestep.
///
/// History starts from zero (all node voltages and inductor currents at 0).
/// Time points are `t0, t0 + h, ...` while `t <= t1 + h/2`; the half-step
/// tolerance guards the final iteration against floating-point drift.
///
/// On a singular matrix the driver emits an error snapshot carrying the
/// failing time and aborts; snapshots already emitted remain valid. On
/// cancellation a `Cancelled` record is emitted and the run stops.
pub fn run_transient(
    circuit: &Circuit,
    params: &TransientParams,
    sink: &mut dyn SnapshotSink,
    cancel: &CancelToken,
) -> Result<()> {
    params.validate()?;
    if !circuit.has_ground() {
        sink.emit(Snapshot::failed(
            SweepParam::Time(params.t0),
            SnapshotStatus::GroundMissing,
        ));
        return Err(Error::GroundMissing);
    }

    let mut ctx = SolverContext::new(circuit);
    ctx.reset_history();

    let mut step = 0usize;
    loop {
        let t = params.t0 + step as f64 * params.h;
        if t > params.t1 + params.h / 2.0 {
            break;
        }

        if cancel.is_cancelled() {
            sink.emit(Snapshot::failed(
                SweepParam::Time(t),
                SnapshotStatus::Cancelled,
            ));
            return Err(Error::Cancelled);
        }

        match ctx.step(circuit, t, params.h, SweepParam::Time(t)) {
            Ok(snapshot) => sink.emit(snapshot),
            Err(Error::SingularCircuit) => {
                sink.emit(Snapshot::failed(
                    SweepParam::Time(t),
                    SnapshotStatus::Singular,
                ));
                return Err(Error::SingularCircuit);
            }
            Err(e) => return Err(e),
        }

        step += 1;
    }

    Ok(())
}

/// Run a transient simulation and collect all snapshots.
///
/// Convenience wrapper over [`run_transient`] for callers that want the
/// whole run in memory.
pub fn collect_transient(circuit: &Circuit, params: &TransientParams) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();
    let mut sink = |s: Snapshot| snapshots.push(s);
    run_transient(circuit, params, &mut sink, &CancelToken::new())?;
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltic_core::{Element, NodeId, Waveform};

    fn rc_circuit() -> Circuit {
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
        c
    }

    #[test]
    fn test_bad_parameters() {
        let c = rc_circuit();
        let mut sink = |_s: Snapshot| {};
        let cancel = CancelToken::new();

        let r = run_transient(&c, &TransientParams::new(0.0, 1e-3, 0.0), &mut sink, &cancel);
        assert!(matches!(r, Err(Error::BadParameters(_))));

        let r = run_transient(&c, &TransientParams::new(1e-3, 0.0, 1e-4), &mut sink, &cancel);
        assert!(matches!(r, Err(Error::BadParameters(_))));
    }

    #[test]
    fn test_ground_required() {
        let mut c = Circuit::new();
        c.add_element(Element::resistor(
            "R1",
            100.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();

        let mut snaps = Vec::new();
        let mut sink = |s: Snapshot| snaps.push(s);
        let r = run_transient(
            &c,
            &TransientParams::new(0.0, 1e-3, 1e-4),
            &mut sink,
            &CancelToken::new(),
        );
        assert!(matches!(r, Err(Error::GroundMissing)));
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].status, SnapshotStatus::GroundMissing);
    }

    #[test]
    fn test_point_count_and_monotone_time() {
        let c = rc_circuit();
        let snaps = collect_transient(&c, &TransientParams::new(0.0, 1e-3, 1e-4)).unwrap();

        // 0 .. 1ms inclusive in 100us steps
        assert_eq!(snaps.len(), 11);
        for pair in snaps.windows(2) {
            assert!(pair[1].param.value() > pair[0].param.value());
        }
    }

    #[test]
    fn test_half_step_guard() {
        // t1 = 0.21ms with h = 0.1ms: 0.3ms exceeds t1 + h/2, so the run
        // stops after 0.2ms.
        let c = rc_circuit();
        let snaps = collect_transient(&c, &TransientParams::new(0.0, 0.21e-3, 0.1e-3)).unwrap();
        let times: Vec<f64> = snaps.iter().map(|s| s.param.value()).collect();
        assert_eq!(times.len(), 3);
        assert!((times[2] - 0.2e-3).abs() < 1e-12);

        // t1 = 0.26ms: 0.3ms is within h/2 of t1, so the guard admits one
        // point past t1.
        let snaps = collect_transient(&c, &TransientParams::new(0.0, 0.26e-3, 0.1e-3)).unwrap();
        let times: Vec<f64> = snaps.iter().map(|s| s.param.value()).collect();
        assert_eq!(times.len(), 4);
        assert!((times[3] - 0.3e-3).abs() < 1e-12);
    }

    #[test]
    fn test_cancellation_before_first_point() {
        let c = rc_circuit();
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut snaps = Vec::new();
        let mut sink = |s: Snapshot| snaps.push(s);
        let r = run_transient(&c, &TransientParams::new(0.0, 1e-3, 1e-4), &mut sink, &cancel);

        assert!(matches!(r, Err(Error::Cancelled)));
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].status, SnapshotStatus::Cancelled);
    }

    #[test]
    fn test_singular_emits_error_snapshot() {
        // Two ideal voltage sources with different values across the same
        // pair of nodes cannot be satisfied.
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(5.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::voltage_source(
            "V2",
            Waveform::dc(3.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();

        let mut snaps = Vec::new();
        let mut sink = |s: Snapshot| snaps.push(s);
        let r = run_transient(
            &c,
            &TransientParams::new(0.0, 1e-3, 1e-4),
            &mut sink,
            &CancelToken::new(),
        );

        assert!(matches!(r, Err(Error::SingularCircuit)));
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].status, SnapshotStatus::Singular);
    }
}
