//! Error types for voltic-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("circuit has no ground node (0)")]
    GroundMissing,

    #[error("bad analysis parameters: {0}")]
    BadParameters(String),

    #[error("singular circuit matrix (floating node, conflicting sources, or missing ground)")]
    SingularCircuit,

    #[error("no DC {kind} source named '{name}'")]
    NoSuchSource { kind: &'static str, name: String },

    #[error("analysis cancelled")]
    Cancelled,

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
