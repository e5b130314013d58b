//! The traversal engine: bounded best-first search with periodic
//! depth-first dives.
//!
//! # Loop
//!
//! ```text
//! check(bottom) → optimum? done
//!   ↓
//! pop_min ─ prunable? → discard
//!   ↓
//! step % stepping == 0 ? dive : expand → optimum? done
//! ```
//!
//! An expansion checks every not-yet-completed successor exactly once,
//! queues it, and reports the cheapest one; a dive keeps expanding that
//! cheapest successor until it runs out of successors. The first anonymous
//! check installs the optimum, after which no further node is checked.
//!
//! Every check tags the lattice: anonymous results mark the upward closure
//! anonymous and upward-pruned, non-anonymous results mark the downward
//! closure not anonymous.

use anonbench_lattice::{InformationLoss, Lattice, LatticeError, NodeId};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::checker::{CheckMode, CheckResult, Checker, StorageTrigger};
use crate::error::SearchError;
use crate::policy::{Stepping, TraversalPolicy};
use crate::queue::BoundedDualQueue;
use crate::state::SearchState;

type Frontier = BoundedDualQueue<NodeId, InformationLoss>;

/// The best anonymous transformation found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    #[serde(skip)]
    pub node: NodeId,
    pub transformation: Vec<u32>,
    pub information_loss: f64,
}

/// Summary of one traversal. `optimum: None` means no solution was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub optimum: Option<Solution>,
    pub checks: u64,
    pub rollups: u64,
    /// Nodes whose successors were enumerated, dives included.
    pub expansions: u64,
    pub dives: u64,
    /// Frontier entries discarded when popped.
    pub pruned: u64,
    /// Frontier entries dropped by capacity enforcement.
    pub evicted: u64,
    pub frontier_high_water: usize,
    pub stepping: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    expansions: u64,
    dives: u64,
    pruned: u64,
    evicted: u64,
    frontier_high_water: usize,
}

/// Single-use traversal over a lattice with a checker.
///
/// The engine owns both collaborators for its lifetime; use
/// [`SearchEngine::into_parts`] to get them back.
#[derive(Debug)]
pub struct SearchEngine<L, C> {
    lattice: L,
    checker: C,
    policy: TraversalPolicy,
    stepping: u32,
    loss_pruning: bool,
    state: SearchState,
    counters: Counters,
    traversed: bool,
}

impl<L: Lattice, C: Checker> SearchEngine<L, C> {
    /// Bind a lattice and a checker under `policy`.
    ///
    /// Resolves the dive cadence and sets the checker's history storage
    /// trigger to [`StorageTrigger::All`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy does not validate.
    pub fn new(mut lattice: L, mut checker: C, policy: TraversalPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        let stepping = match policy.stepping {
            Stepping::LatticeHeight => {
                let top = lattice.top();
                lattice.level(top).max(1)
            }
            Stepping::Every(n) => n,
        };
        checker.set_storage_trigger(StorageTrigger::All);
        #[allow(clippy::float_cmp)]
        let loss_pruning = checker.metric_is_monotonic() || checker.max_allowed_outliers() == 0.0;
        Ok(Self {
            lattice,
            checker,
            policy,
            stepping,
            loss_pruning,
            state: SearchState::new(),
            counters: Counters::default(),
            traversed: false,
        })
    }

    /// Run the search to completion.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::AlreadyTraversed`] on a second call, and
    /// propagates checker and lattice failures unchanged.
    pub fn traverse(&mut self) -> Result<SearchOutcome, SearchError> {
        if self.traversed {
            return Err(SearchError::AlreadyTraversed);
        }
        self.traversed = true;
        info!(
            stepping = self.stepping,
            capacity = self.policy.max_queue_size,
            successor_mode = ?self.policy.successor_mode,
            loss_pruning = self.loss_pruning,
            "traversal started"
        );

        let mut frontier = Frontier::new(self.policy.max_queue_size);
        let bottom = self.lattice.bottom();
        self.assure_checked(bottom)?;
        if self.state.optimum().is_none() {
            frontier.push(bottom, self.loss_of(bottom)?);
            self.run(&mut frontier)?;
        }
        self.counters.frontier_high_water = frontier.high_water();

        let outcome = self.outcome()?;
        info!(
            checks = outcome.checks,
            rollups = outcome.rollups,
            expansions = outcome.expansions,
            dives = outcome.dives,
            pruned = outcome.pruned,
            evicted = outcome.evicted,
            solved = outcome.optimum.is_some(),
            "traversal finished"
        );
        Ok(outcome)
    }

    fn run(&mut self, frontier: &mut Frontier) -> Result<(), SearchError> {
        let mut step: u64 = 0;
        while let Some(next) = frontier.pop_min() {
            if self.prune(next)? {
                self.counters.pruned += 1;
                continue;
            }
            step += 1;
            if step % u64::from(self.stepping) == 0 {
                self.dive(frontier, next)?;
            } else {
                self.process_node(frontier, next)?;
            }
            if self.state.optimum().is_some() {
                break;
            }
        }
        Ok(())
    }

    /// Expand `node` and follow the cheapest successor until none is left.
    fn dive(&mut self, frontier: &mut Frontier, node: NodeId) -> Result<(), SearchError> {
        self.counters.dives += 1;
        let mut depth = 0u32;
        let mut current = node;
        while let Some(next) = self.process_node(frontier, current)? {
            frontier.remove(&next);
            current = next;
            depth += 1;
        }
        debug!(from = %node, depth, "dive finished");
        Ok(())
    }

    /// Check and queue every successor of `node` that is not completed, then
    /// complete `node`. Returns the cheapest such successor.
    ///
    /// Returns `None` without completing `node` once an optimum exists.
    fn process_node(
        &mut self,
        frontier: &mut Frontier,
        node: NodeId,
    ) -> Result<Option<NodeId>, SearchError> {
        self.counters.expansions += 1;
        let successors = self
            .lattice
            .successors(node, self.policy.successor_mode.candidates_only());

        let mut cheapest: Option<(NodeId, InformationLoss)> = None;
        for successor in successors {
            if self.state.optimum().is_some() {
                return Ok(None);
            }
            if !self.lattice.state(successor).is_completed() {
                self.assure_checked(successor)?;
                let loss = self.loss_of(successor)?;
                frontier.push(successor, loss);
                let improves = match cheapest {
                    Some((_, best)) => loss < best,
                    None => true,
                };
                if improves {
                    cheapest = Some((successor, loss));
                }
            }
            let evicted = frontier.evict_overflow();
            if !evicted.is_empty() {
                self.counters.evicted += evicted.len() as u64;
                debug!(count = evicted.len(), "frontier over capacity, evicted worst entries");
            }
        }

        self.lattice.set_completed(node)?;
        Ok(cheapest.map(|(successor, _)| successor))
    }

    /// Whether a popped node can be discarded without expansion.
    ///
    /// Completed nodes always can. With an optimum in hand, a node whose loss
    /// is not below the optimum's can too, but only when that bound carries
    /// over to its successors: a monotonic metric or zero allowed outliers.
    fn prune(&self, node: NodeId) -> Result<bool, SearchError> {
        if self.lattice.state(node).is_completed() {
            return Ok(true);
        }
        match self.state.optimum() {
            Some(optimum) if self.loss_pruning => Ok(self.loss_of(node)? >= self.loss_of(optimum)?),
            _ => Ok(false),
        }
    }

    fn assure_checked(&mut self, node: NodeId) -> Result<(), SearchError> {
        if self.lattice.state(node).is_checked() {
            return Ok(());
        }
        self.check(node)
    }

    fn check(&mut self, node: NodeId) -> Result<(), SearchError> {
        let result = self
            .checker
            .check(self.lattice.transformation(node), CheckMode::Cached)?;
        self.lattice
            .set_checked(node, result.anonymous, result.information_loss)?;
        self.track_optimum(node, result)?;
        let rollup = self.state.record_check(self.lattice.transformation(node));
        trace!(
            node = %node,
            transformation = ?self.lattice.transformation(node),
            anonymous = result.anonymous,
            loss = result.information_loss.value(),
            rollup,
            "checked"
        );

        let tagged = if result.anonymous {
            self.lattice.set_anonymous_upwards(node)
        } else {
            self.lattice.set_not_anonymous_downwards(node)
        };
        trace!(node = %node, tagged, "propagated verdict");
        Ok(())
    }

    fn track_optimum(&mut self, node: NodeId, result: CheckResult) -> Result<(), SearchError> {
        if !result.anonymous {
            return Ok(());
        }
        let improves = match self.state.optimum() {
            Some(current) => result.information_loss < self.loss_of(current)?,
            None => true,
        };
        if improves {
            self.state.set_optimum(node);
            debug!(
                node = %node,
                transformation = ?self.lattice.transformation(node),
                loss = result.information_loss.value(),
                "new global optimum"
            );
        }
        Ok(())
    }

    fn loss_of(&self, node: NodeId) -> Result<InformationLoss, SearchError> {
        self.lattice
            .state(node)
            .information_loss()
            .ok_or(SearchError::Lattice(LatticeError::NotChecked { node }))
    }

    fn outcome(&self) -> Result<SearchOutcome, SearchError> {
        let optimum = match self.state.optimum() {
            Some(node) => Some(Solution {
                node,
                transformation: self.lattice.transformation(node).to_vec(),
                information_loss: self.loss_of(node)?.value(),
            }),
            None => None,
        };
        Ok(SearchOutcome {
            optimum,
            checks: self.state.checks(),
            rollups: self.state.rollups(),
            expansions: self.counters.expansions,
            dives: self.counters.dives,
            pruned: self.counters.pruned,
            evicted: self.counters.evicted,
            frontier_high_water: self.counters.frontier_high_water,
            stepping: self.stepping,
        })
    }

    /// Score an arbitrary transformation under this engine's metric.
    ///
    /// Bypasses the checker's cache and leaves all node state untouched, so it
    /// can score a solution found by a different engine.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::checker::CheckerError`] as [`SearchError::Checker`].
    pub fn information_loss_of(
        &mut self,
        transformation: &[u32],
    ) -> Result<InformationLoss, SearchError> {
        let result = self
            .checker
            .check(transformation, CheckMode::ForceRecompute)?;
        Ok(result.information_loss)
    }

    #[must_use]
    pub fn global_optimum(&self) -> Option<NodeId> {
        self.state.optimum()
    }

    #[must_use]
    pub fn num_checks(&self) -> u64 {
        self.state.checks()
    }

    #[must_use]
    pub fn num_rollups(&self) -> u64 {
        self.state.rollups()
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    /// Resolved dive cadence.
    #[must_use]
    pub fn stepping(&self) -> u32 {
        self.stepping
    }

    #[must_use]
    pub fn policy(&self) -> &TraversalPolicy {
        &self.policy
    }

    #[must_use]
    pub fn lattice(&self) -> &L {
        &self.lattice
    }

    #[must_use]
    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Give back the lattice and checker.
    #[must_use]
    pub fn into_parts(self) -> (L, C) {
        (self.lattice, self.checker)
    }
}
