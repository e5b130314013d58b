//! Per-node property state, stored in a flat arena indexed by [`NodeId`].
//!
//! Every node carries one [`NodeState`]. Transitions go through
//! [`NodeStates`] so the ordering rules hold by construction:
//!
//! - lifecycle only moves forward: `Unchecked → Checked → Completed`;
//! - a node is checked at most once;
//! - predicted anonymity only fills `Unknown`, a check result is authoritative;
//! - the upward-pruned marker is never cleared.

use crate::error::LatticeError;
use crate::loss::InformationLoss;
use crate::node::NodeId;

/// Where a node is in its search lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lifecycle {
    /// Discovered, never evaluated.
    #[default]
    Unchecked,
    /// Evaluated by the checker exactly once.
    Checked,
    /// All successors handled. Never cleared.
    Completed,
}

/// What is known about a node's feasibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anonymity {
    #[default]
    Unknown,
    Anonymous,
    NotAnonymous,
}

/// Property state of one lattice node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeState {
    lifecycle: Lifecycle,
    anonymity: Anonymity,
    upward_pruned: bool,
    information_loss: Option<InformationLoss>,
}

impl NodeState {
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn anonymity(&self) -> Anonymity {
        self.anonymity
    }

    /// Whether the node lies in the upward closure of an anonymous node.
    #[must_use]
    pub fn is_upward_pruned(&self) -> bool {
        self.upward_pruned
    }

    /// The loss recorded by the check, if the node has been checked.
    #[must_use]
    pub fn information_loss(&self) -> Option<InformationLoss> {
        self.information_loss
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.lifecycle >= Lifecycle::Checked
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.lifecycle == Lifecycle::Completed
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.anonymity == Anonymity::Anonymous
    }

    #[must_use]
    pub fn is_not_anonymous(&self) -> bool {
        self.anonymity == Anonymity::NotAnonymous
    }
}

/// Arena of node states. Index `i` holds the state of `NodeId::new(i)`.
#[derive(Debug, Clone, Default)]
pub struct NodeStates {
    states: Vec<NodeState>,
}

impl NodeStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the state of a freshly created node and return its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` nodes are allocated.
    pub fn allocate(&mut self) -> NodeId {
        let index = u32::try_from(self.states.len()).expect("node arena exceeds u32::MAX entries");
        self.states.push(NodeState::default());
        NodeId::new(index)
    }

    /// Number of allocated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was not issued by this arena.
    #[must_use]
    pub fn get(&self, node: NodeId) -> &NodeState {
        &self.states[node.index()]
    }

    /// Record a check result.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::AlreadyChecked`] if the node was checked before.
    pub fn set_checked(
        &mut self,
        node: NodeId,
        anonymous: bool,
        information_loss: InformationLoss,
    ) -> Result<(), LatticeError> {
        let state = &mut self.states[node.index()];
        if state.is_checked() {
            return Err(LatticeError::AlreadyChecked { node });
        }
        state.lifecycle = Lifecycle::Checked;
        state.information_loss = Some(information_loss);
        state.anonymity = if anonymous {
            Anonymity::Anonymous
        } else {
            Anonymity::NotAnonymous
        };
        Ok(())
    }

    /// Mark a checked node as completed. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NotChecked`] if the node was never checked.
    pub fn set_completed(&mut self, node: NodeId) -> Result<(), LatticeError> {
        let state = &mut self.states[node.index()];
        if !state.is_checked() {
            return Err(LatticeError::NotChecked { node });
        }
        state.lifecycle = Lifecycle::Completed;
        Ok(())
    }

    /// Predict `Anonymous` and set the upward-pruned marker.
    ///
    /// Returns `true` if anything changed.
    pub fn tag_anonymous(&mut self, node: NodeId) -> bool {
        let state = &mut self.states[node.index()];
        let mut changed = false;
        if state.anonymity == Anonymity::Unknown {
            state.anonymity = Anonymity::Anonymous;
            changed = true;
        }
        if !state.upward_pruned {
            state.upward_pruned = true;
            changed = true;
        }
        changed
    }

    /// Predict `NotAnonymous`. Returns `true` if the state changed.
    pub fn tag_not_anonymous(&mut self, node: NodeId) -> bool {
        let state = &mut self.states[node.index()];
        if state.anonymity == Anonymity::Unknown {
            state.anonymity = Anonymity::NotAnonymous;
            true
        } else {
            false
        }
    }
}
