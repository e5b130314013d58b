//! `GeneralizationLattice`: the full product lattice of per-attribute
//! generalization levels, materialized lazily.
//!
//! A transformation assigns each attribute a level in `min[i]..=max[i]`.
//! Successors raise exactly one attribute by one level, predecessors lower
//! exactly one attribute by one level; both enumerate attributes in ascending
//! index order. Nodes are interned by transformation on first request, so the
//! memory footprint grows with the part of the lattice actually touched.
//!
//! Verdict propagation follows the same rule. The lattice keeps the
//! transformations that closures were propagated from; existing nodes are
//! tagged on the spot and later nodes when they are interned.

use std::collections::HashMap;

use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::node::{dominates, NodeId};
use crate::state::NodeStates;

/// Lazily materialized product lattice.
#[derive(Debug, Clone)]
pub struct GeneralizationLattice {
    min_levels: Vec<u32>,
    max_levels: Vec<u32>,
    transformations: Vec<Box<[u32]>>,
    index: HashMap<Box<[u32]>, NodeId>,
    states: NodeStates,
    /// Every node dominating one of these is anonymous and upward-pruned.
    anonymous_roots: Vec<Box<[u32]>>,
    /// Every node dominated by one of these is not anonymous.
    not_anonymous_roots: Vec<Box<[u32]>>,
}

impl GeneralizationLattice {
    /// Create a lattice whose attribute `i` ranges over `min_levels[i]..=max_levels[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidBounds`] if there are no attributes, the
    /// bound vectors differ in length, or some `min > max`.
    pub fn new(min_levels: Vec<u32>, max_levels: Vec<u32>) -> Result<Self, LatticeError> {
        if max_levels.is_empty() {
            return Err(LatticeError::InvalidBounds {
                detail: "at least one attribute is required".into(),
            });
        }
        if min_levels.len() != max_levels.len() {
            return Err(LatticeError::InvalidBounds {
                detail: format!(
                    "{} minimum levels for {} attributes",
                    min_levels.len(),
                    max_levels.len()
                ),
            });
        }
        if let Some(i) = (0..max_levels.len()).find(|&i| min_levels[i] > max_levels[i]) {
            return Err(LatticeError::InvalidBounds {
                detail: format!(
                    "attribute {i}: min level {} exceeds max level {}",
                    min_levels[i], max_levels[i]
                ),
            });
        }
        Ok(Self {
            min_levels,
            max_levels,
            transformations: Vec::new(),
            index: HashMap::new(),
            states: NodeStates::new(),
            anonymous_roots: Vec::new(),
            not_anonymous_roots: Vec::new(),
        })
    }

    /// Create a lattice from hierarchy heights: attribute `i` has
    /// `heights[i]` levels, `0..heights[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidBounds`] if `heights` is empty or
    /// contains a zero.
    pub fn with_heights(heights: &[u32]) -> Result<Self, LatticeError> {
        if let Some(i) = heights.iter().position(|&h| h == 0) {
            return Err(LatticeError::InvalidBounds {
                detail: format!("attribute {i} has an empty hierarchy"),
            });
        }
        let max_levels = heights.iter().map(|h| h - 1).collect();
        Self::new(vec![0; heights.len()], max_levels)
    }

    /// Number of attributes (the arity of every transformation).
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.max_levels.len()
    }

    /// Number of nodes materialized so far.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.transformations.len()
    }

    /// Total number of nodes in the lattice, saturating at `u64::MAX`.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.min_levels
            .iter()
            .zip(&self.max_levels)
            .fold(1u64, |acc, (lo, hi)| {
                acc.saturating_mul(u64::from(hi - lo) + 1)
            })
    }

    /// Look up a node without creating it.
    #[must_use]
    pub fn find(&self, transformation: &[u32]) -> Option<NodeId> {
        self.index.get(transformation).copied()
    }

    /// Return the node for `transformation`, creating it on first request.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidBounds`] if the transformation has the
    /// wrong arity or a level outside the attribute's bounds.
    pub fn node(&mut self, transformation: &[u32]) -> Result<NodeId, LatticeError> {
        if transformation.len() != self.dimensions() {
            return Err(LatticeError::InvalidBounds {
                detail: format!(
                    "transformation has {} levels, lattice has {} attributes",
                    transformation.len(),
                    self.dimensions()
                ),
            });
        }
        let in_bounds = transformation
            .iter()
            .enumerate()
            .all(|(i, &level)| (self.min_levels[i]..=self.max_levels[i]).contains(&level));
        if !in_bounds {
            return Err(LatticeError::InvalidBounds {
                detail: format!("transformation {transformation:?} is outside the lattice"),
            });
        }
        Ok(self.intern(transformation))
    }

    fn intern(&mut self, transformation: &[u32]) -> NodeId {
        if let Some(&id) = self.index.get(transformation) {
            return id;
        }
        let id = self.states.allocate();
        if self
            .anonymous_roots
            .iter()
            .any(|root| dominates(transformation, root))
        {
            self.states.tag_anonymous(id);
        }
        if self
            .not_anonymous_roots
            .iter()
            .any(|root| dominates(root, transformation))
        {
            self.states.tag_not_anonymous(id);
        }
        let key: Box<[u32]> = transformation.into();
        self.transformations.push(key.clone());
        self.index.insert(key, id);
        id
    }

    fn neighbours(&mut self, node: NodeId, step_up: bool) -> Vec<NodeId> {
        let base = self.transformations[node.index()].clone();
        let mut result = Vec::with_capacity(base.len());
        let mut scratch = base.to_vec();
        for (i, &level) in base.iter().enumerate() {
            let next = if step_up {
                if level == self.max_levels[i] {
                    continue;
                }
                level + 1
            } else {
                if level == self.min_levels[i] {
                    continue;
                }
                level - 1
            };
            scratch[i] = next;
            result.push(self.intern(&scratch));
            scratch[i] = level;
        }
        result
    }
}

impl Lattice for GeneralizationLattice {
    fn bottom(&mut self) -> NodeId {
        let min = self.min_levels.clone();
        self.intern(&min)
    }

    fn top(&mut self) -> NodeId {
        let max = self.max_levels.clone();
        self.intern(&max)
    }

    fn transformation(&self, node: NodeId) -> &[u32] {
        &self.transformations[node.index()]
    }

    fn level(&self, node: NodeId) -> u32 {
        self.transformations[node.index()]
            .iter()
            .zip(&self.min_levels)
            .map(|(level, min)| level - min)
            .sum()
    }

    fn successors(&mut self, node: NodeId, candidates_only: bool) -> Vec<NodeId> {
        let mut successors = self.neighbours(node, true);
        if candidates_only {
            successors.retain(|&s| {
                let state = self.states.get(s);
                !state.is_completed() && !state.is_upward_pruned()
            });
        }
        successors
    }

    fn predecessors(&mut self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, false)
    }

    fn states(&self) -> &NodeStates {
        &self.states
    }

    fn states_mut(&mut self) -> &mut NodeStates {
        &mut self.states
    }

    fn set_anonymous_upwards(&mut self, node: NodeId) -> usize {
        let root = self.transformations[node.index()].clone();
        if self.anonymous_roots.iter().any(|r| dominates(&root, r)) {
            return usize::from(self.states.tag_anonymous(node));
        }
        self.anonymous_roots.retain(|r| !dominates(r, &root));
        let mut changed = 0;
        for (transformation, &id) in &self.index {
            if dominates(transformation, &root) && self.states.tag_anonymous(id) {
                changed += 1;
            }
        }
        self.anonymous_roots.push(root);
        changed
    }

    fn set_not_anonymous_downwards(&mut self, node: NodeId) -> usize {
        let root = self.transformations[node.index()].clone();
        if self.not_anonymous_roots.iter().any(|r| dominates(r, &root)) {
            return usize::from(self.states.tag_not_anonymous(node));
        }
        self.not_anonymous_roots.retain(|r| !dominates(&root, r));
        let mut changed = 0;
        for (transformation, &id) in &self.index {
            if dominates(&root, transformation) && self.states.tag_not_anonymous(id) {
                changed += 1;
            }
        }
        self.not_anonymous_roots.push(root);
        changed
    }
}
