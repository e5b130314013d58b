//! anonbench search: bounded best-first traversal with periodic dives.
//!
//! This crate provides the search layer. It depends only on
//! `anonbench_lattice` and does NOT depend on `anonbench_harness`.
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
//! - [`BoundedDualQueue`]: min/max frontier with capacity eviction
//! - [`Checker`]: trait for feasibility and loss evaluation
//! - [`SearchEngine`]: the traversal itself
//! - [`TraversalPolicy`] / [`Strategy`]: configuration and named presets
//! - [`SearchOutcome`]: optimum and counters of one traversal

#![forbid(unsafe_code)]

pub mod checker;
pub mod engine;
pub mod error;
pub mod policy;
pub mod queue;
pub mod state;

pub use checker::{CheckMode, CheckResult, Checker, CheckerError, StorageTrigger};
pub use engine::{SearchEngine, SearchOutcome, Solution};
pub use error::SearchError;
pub use policy::{Stepping, Strategy, SuccessorMode, TraversalPolicy};
pub use queue::{BoundedDualQueue, DEFAULT_CAPACITY};
pub use state::SearchState;
