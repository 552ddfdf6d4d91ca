//! Error model for value-graph operations.

use thiserror::Error;

/// Result type used across the workspace.
pub type GraphResult<T> = Result<T, GraphError>;

/// Value-graph error.
///
/// Deterministic failures surfaced by the value model and the clone engine.
/// Nothing here is retried; every failure propagates to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A composite's cell is mutably borrowed elsewhere and cannot be
    /// accessed. Surfaced instead of skipping the node: a skipped node in a
    /// cyclic graph would make traversal unbounded.
    #[error("{kind} is borrowed elsewhere and cannot be accessed")]
    NodeBusy { kind: &'static str },

    /// A sequence index was out of range.
    #[error("index {index} out of bounds for sequence of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

impl GraphError {
    pub fn busy(kind: &'static str) -> Self {
        Self::NodeBusy { kind }
    }

    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }
}
