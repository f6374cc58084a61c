//! Error types for voltic-core.

use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("element name already exists: {0}")]
    NameExists(String),

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("node not found: {0}")]
    NodeMissing(NodeId),

    #[error("node already exists: {0} (merging nodes is not allowed)")]
    NodeConflict(NodeId),

    #[error("bad parameters: {0}")]
    BadParameters(String),
}

pub type Result<T> = std::result::Result<T, Error>;
