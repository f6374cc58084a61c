//! # Voltic
//!
//! An interactive lumped-element circuit simulator.
//!
//! Voltic simulates networks of two-terminal passive elements (resistors,
//! capacitors, inductors) and independent DC or sinusoidal sources joined at
//! integer-labeled nodes. Circuits are formulated with Modified Nodal
//! Analysis; energy-storage elements are discretized with backward-Euler
//! companion models.
//!
//! Analyses:
//! - Transient simulation with a fixed, user-chosen timestep
//! - DC sweeps of a named voltage or current source
//!
//! ## Quick start
//!
//! ```rust
//! use voltic::prelude::*;
//!
//! // Voltage divider: V1 = 10V, R1 = R2 = 1k
//! let mut circuit = Circuit::with_name("divider");
//! circuit
//!     .add_element(Element::voltage_source(
//!         "V1",
//!         Waveform::dc(10.0),
//!         NodeId::new(1),
//!         NodeId::GROUND,
//!     ))
//!     .unwrap();
//! circuit
//!     .add_element(Element::resistor("R1", 1e3, NodeId::new(1), NodeId::new(2)))
//!     .unwrap();
//! circuit
//!     .add_element(Element::resistor("R2", 1e3, NodeId::new(2), NodeId::GROUND))
//!     .unwrap();
//!
//! let snapshots =
//!     collect_transient(&circuit, &TransientParams::new(0.0, 0.0, 1.0)).unwrap();
//! assert!((snapshots[0].voltage(NodeId::new(2)) - 5.0).abs() < 1e-9);
//! ```

// Re-export member crates
pub use voltic_core as core;
pub use voltic_solver as solver;

// Convenient re-exports from voltic_core
pub use voltic_core::{
    Circuit,
    Element,
    ElementKind,
    Error as CoreError,
    NodeId,
    NodeIndex,
    Waveform,
};

// MNA system (exported from submodule)
pub use voltic_core::mna::MnaSystem;

// Convenient re-exports from voltic_solver
pub use voltic_solver::{
    collect_dc_sweep_i,
    collect_dc_sweep_v,
    collect_transient,
    run_dc_sweep_i,
    run_dc_sweep_v,
    run_transient,
    solve_dense,
    CancelToken,
    DcSweepParams,
    Error as SolverError,
    Snapshot,
    SnapshotSink,
    SnapshotStatus,
    SolverContext,
    SweepParam,
    TransientParams,
};

/// Re-export of nalgebra's dynamic vector type.
pub use nalgebra::DVector;

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Prelude module containing commonly used types.
///
/// ```rust
/// use voltic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Circuit, Element, ElementKind, MnaSystem, NodeId, Waveform};

    pub use crate::{
        collect_dc_sweep_i, collect_dc_sweep_v, collect_transient, run_dc_sweep_i,
        run_dc_sweep_v, run_transient, CancelToken, DcSweepParams, Snapshot, SnapshotStatus,
        SweepParam, TransientParams,
    };

    pub use crate::{DMatrix, DVector};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut circuit = Circuit::new();
        circuit
            .add_element(Element::voltage_source(
                "V1",
                Waveform::dc(5.0),
                NodeId::new(1),
                NodeId::GROUND,
            ))
            .unwrap();
        circuit
            .add_element(Element::resistor("R1", 1e3, NodeId::new(1), NodeId::GROUND))
            .unwrap();

        let snaps = collect_transient(&circuit, &TransientParams::new(0.0, 0.0, 1.0)).unwrap();
        assert!((snaps[0].current("R1") - 0.005).abs() < 1e-9);
    }
}
