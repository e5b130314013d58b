//! The lattice contract consumed by the search engine.

use crate::error::LatticeError;
use crate::loss::InformationLoss;
use crate::node::NodeId;
use crate::state::{NodeState, NodeStates};

/// Partially ordered space of transformations with per-node property state.
///
/// Implementations create nodes lazily: `bottom`, `top`, `successors` and
/// `predecessors` may allocate. The engine never asks for the full node set.
///
/// # Contract
///
/// - Successor and predecessor enumeration must be deterministic.
/// - `successors(node, true)` returns a subset of `successors(node, false)`
///   that omits only nodes the engine would never expand again
///   (completed or upward-pruned ones).
/// - `states()` must hold an entry for every node id handed out.
/// - Verdict propagation never creates nodes.
pub trait Lattice {
    /// The least generalized transformation.
    fn bottom(&mut self) -> NodeId;

    /// The most generalized transformation.
    fn top(&mut self) -> NodeId;

    /// Per-attribute generalization levels of `node`.
    fn transformation(&self, node: NodeId) -> &[u32];

    /// Generalization steps of `node` above the bottom.
    fn level(&self, node: NodeId) -> u32;

    /// Direct successors (one step more general).
    fn successors(&mut self, node: NodeId, candidates_only: bool) -> Vec<NodeId>;

    /// Direct predecessors (one step less general).
    fn predecessors(&mut self, node: NodeId) -> Vec<NodeId>;

    fn states(&self) -> &NodeStates;

    fn states_mut(&mut self) -> &mut NodeStates;

    fn state(&self, node: NodeId) -> &NodeState {
        self.states().get(node)
    }

    /// Record a check result for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::AlreadyChecked`] on a second check.
    fn set_checked(
        &mut self,
        node: NodeId,
        anonymous: bool,
        information_loss: InformationLoss,
    ) -> Result<(), LatticeError> {
        self.states_mut()
            .set_checked(node, anonymous, information_loss)
    }

    /// Mark `node` as completed.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NotChecked`] if `node` was never checked.
    fn set_completed(&mut self, node: NodeId) -> Result<(), LatticeError> {
        self.states_mut().set_completed(node)
    }

    /// Tag `node` and its whole upward closure anonymous and upward-pruned.
    ///
    /// Must not materialize the closure: nodes created later inherit the
    /// tag when they are first handed out. Returns the number of existing
    /// nodes whose state changed.
    fn set_anonymous_upwards(&mut self, node: NodeId) -> usize;

    /// Tag `node`'s whole downward closure not anonymous.
    ///
    /// Same laziness rule as [`Lattice::set_anonymous_upwards`]. Returns the
    /// number of existing nodes whose state changed.
    fn set_not_anonymous_downwards(&mut self, node: NodeId) -> usize;
}
