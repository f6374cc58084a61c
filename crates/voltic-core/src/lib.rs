//! Core circuit representation and MNA matrix structures for Voltic.
//!
//! This crate provides the data model for the simulator: node identifiers,
//! two-terminal elements with DC/sine source waveforms, the insertion-ordered
//! [`Circuit`] container with its editor operations, the node-to-row
//! [`NodeIndex`], and the MNA matrix structure the solver assembles into.
//!
//! # Modified Nodal Analysis (MNA)
//!
//! MNA is a systematic method for formulating circuit equations. The system
//! `Ax = z` contains:
//!
//! - Node voltages at every non-datum node
//! - Branch currents through voltage sources and inductors
//!
//! # Example: Building an MNA System
//!
//! ```rust
//! use voltic_core::mna::MnaSystem;
//!
//! // Voltage divider: V1 = 10V at node row 0, R1 = R2 = 1k
//! let mut mna = MnaSystem::new(2, 1, 0); // 2 nodes, 1 voltage source
//!
//! mna.stamp_voltage_source(Some(0), None, 0, 10.0);
//! mna.stamp_conductance(Some(0), Some(1), 1.0 / 1000.0);
//! mna.stamp_conductance(Some(1), None, 1.0 / 1000.0);
//!
//! assert_eq!(mna.size(), 3); // 2 node rows + 1 branch current
//! ```
//!
//! # Example: Building a Circuit
//!
//! ```rust
//! use voltic_core::{Circuit, Element, NodeId, Waveform};
//!
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
//! assert!(circuit.has_ground());
//! assert_eq!(circuit.node_set().len(), 3);
//! ```

pub mod circuit;
pub mod element;
pub mod error;
pub mod index;
pub mod mna;
pub mod netlist;
pub mod node;
pub mod units;
pub mod waveform;

pub use circuit::Circuit;
pub use element::{Element, ElementKind};
pub use error::{Error, Result};
pub use index::NodeIndex;
pub use node::NodeId;
pub use waveform::Waveform;
