//! Typed search errors.
//!
//! Configuration errors surface from [`crate::engine::SearchEngine::new`] and
//! [`crate::policy::Strategy`] parsing, before any node is checked.
//! Collaborator failures surface from `traverse()` unchanged. Finding no
//! solution is not an error.

use anonbench_lattice::LatticeError;

use crate::checker::CheckerError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A policy field is out of range.
    #[error("invalid traversal policy: {detail}")]
    InvalidPolicy { detail: String },
    /// A strategy name did not match any known preset.
    #[error("unknown strategy `{name}`")]
    UnknownStrategy { name: String },
    /// `traverse()` was called twice on the same engine.
    #[error("engine has already traversed its lattice")]
    AlreadyTraversed,
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Checker(#[from] CheckerError),
}
