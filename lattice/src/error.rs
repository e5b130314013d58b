//! Typed lattice errors.

use crate::node::NodeId;

/// Failure raised by lattice construction or by an illegal state transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// Level bounds are empty, mismatched in length, or have `min > max`.
    #[error("invalid lattice bounds: {detail}")]
    InvalidBounds { detail: String },
    /// A node was checked a second time.
    #[error("node {node} has already been checked")]
    AlreadyChecked { node: NodeId },
    /// An operation required a checked node.
    #[error("node {node} has not been checked")]
    NotChecked { node: NodeId },
}
