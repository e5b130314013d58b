//! anonbench lattice: the partially ordered space of generalization transformations.
//!
//! This is the leaf crate of the workspace. It owns node identity, the
//! per-node property state and the closure propagation rules; the search
//! engine only ever holds [`NodeId`]s.
//!
//! # Crate dependency graph
//!
//! ```text
//! anonbench_lattice  ←  anonbench_search  ←  anonbench_harness
//! (nodes, states)       (frontier, engine)    (fixtures, matrix, runner)
//! ```
//!
//! # Key types
//!
//! - [`NodeId`]: dense arena index of a lattice node
//! - [`InformationLoss`]: totally ordered loss score
//! - [`NodeState`]: lifecycle, anonymity and pruning marker of one node
//! - [`Lattice`]: structure + property contract consumed by the engine
//! - [`GeneralizationLattice`]: lazily materialized reference lattice

#![forbid(unsafe_code)]

pub mod error;
pub mod generalization;
pub mod lattice;
pub mod loss;
pub mod node;
pub mod state;

pub use error::LatticeError;
pub use generalization::GeneralizationLattice;
pub use lattice::Lattice;
pub use loss::InformationLoss;
pub use node::{dominates, NodeId};
pub use state::{Anonymity, Lifecycle, NodeState, NodeStates};
