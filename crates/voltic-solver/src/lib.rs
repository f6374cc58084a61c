//! Analysis engines for Voltic.
//!
//! This crate turns a [`Circuit`](voltic_core::Circuit) into per-point
//! result records:
//!
//! - **Transient analysis** - backward-Euler time stepping with companion
//!   models for capacitors and inductors
//! - **DC sweeps** - a named DC voltage or current source stepped through a
//!   range, with capacitors open and inductors short
//!
//! Each analysis point is formulated with Modified Nodal Analysis and solved
//! by dense LU with partial pivoting; pivots below a relative tolerance
//! report the circuit as singular. Drivers push [`Snapshot`] records through
//! a caller-supplied sink and poll a [`CancelToken`] between points.
//!
//! # Example: RC charging
//!
//! ```rust
//! use voltic_core::{Circuit, Element, NodeId, Waveform};
//! use voltic_solver::{collect_transient, TransientParams};
//!
//! let mut circuit = Circuit::new();
//! circuit
//!     .add_element(Element::voltage_source(
//!         "V1",
//!         Waveform::dc(1.0),
//!         NodeId::new(1),
//!         NodeId::GROUND,
//!     ))
//!     .unwrap();
//! circuit
//!     .add_element(Element::resistor("R1", 1e3, NodeId::new(1), NodeId::new(2)))
//!     .unwrap();
//! circuit
//!     .add_element(Element::capacitor("C1", 1e-6, NodeId::new(2), NodeId::GROUND))
//!     .unwrap();
//!
//! let snapshots =
//!     collect_transient(&circuit, &TransientParams::new(0.0, 5e-3, 1e-4)).unwrap();
//!
//! // After five time constants the capacitor is nearly charged.
//! let v_end = snapshots.last().unwrap().voltage(NodeId::new(2));
//! assert!((v_end - 1.0).abs() < 0.05);
//! ```

pub mod cancel;
pub mod context;
pub mod error;
pub mod linear;
pub mod snapshot;
pub mod sweep;
pub mod transient;

pub use cancel::CancelToken;
pub use context::SolverContext;
pub use error::{Error, Result};
pub use linear::solve_dense;
pub use snapshot::{Snapshot, SnapshotSink, SnapshotStatus, SweepParam};
pub use sweep::{
    collect_dc_sweep_i, collect_dc_sweep_v, run_dc_sweep_i, run_dc_sweep_v, DcSweepParams,
};
pub use transient::{collect_transient, run_transient, TransientParams};
