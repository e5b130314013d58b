//! Per-traversal bookkeeping: check and rollup counters, previous check,
//! global optimum.

use anonbench_lattice::{dominates, NodeId};

/// Mutable state of one traversal. Not shared between engines.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    checks: u64,
    rollups: u64,
    previous: Option<Vec<u32>>,
    optimum: Option<NodeId>,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a check of `transformation`.
    ///
    /// The check is a rollup if it generalizes the previously checked
    /// transformation in every attribute. Returns whether it was one.
    pub fn record_check(&mut self, transformation: &[u32]) -> bool {
        self.checks += 1;
        let rollup = self
            .previous
            .as_deref()
            .is_some_and(|previous| dominates(transformation, previous));
        if rollup {
            self.rollups += 1;
        }
        match &mut self.previous {
            Some(previous) => {
                previous.clear();
                previous.extend_from_slice(transformation);
            }
            None => self.previous = Some(transformation.to_vec()),
        }
        rollup
    }

    #[must_use]
    pub fn checks(&self) -> u64 {
        self.checks
    }

    #[must_use]
    pub fn rollups(&self) -> u64 {
        self.rollups
    }

    /// The transformation checked most recently.
    #[must_use]
    pub fn previous(&self) -> Option<&[u32]> {
        self.previous.as_deref()
    }

    #[must_use]
    pub fn optimum(&self) -> Option<NodeId> {
        self.optimum
    }

    pub(crate) fn set_optimum(&mut self, node: NodeId) {
        self.optimum = Some(node);
    }
}
