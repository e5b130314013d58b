//! Exhaustive reference search for small lattices.

use std::collections::{BTreeSet, HashSet, VecDeque};

use anonbench_lattice::{GeneralizationLattice, InformationLoss, Lattice};
use anonbench_search::{CheckMode, Checker};

use crate::error::HarnessError;

/// Result of checking every node.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    /// Lowest-loss anonymous transformation; ties go to the first in
    /// breadth-first order from the bottom.
    pub optimum: Option<(Vec<u32>, InformationLoss)>,
    pub visited: BTreeSet<Vec<u32>>,
}

/// Check every transformation with `0 <= level[i] < heights[i]`.
///
/// # Errors
///
/// Returns [`HarnessError::Lattice`] for invalid heights and
/// [`HarnessError::Search`] if the checker fails.
pub fn exhaustive<C: Checker>(heights: &[u32], checker: &mut C) -> Result<Baseline, HarnessError> {
    let mut lattice = GeneralizationLattice::with_heights(heights)?;
    let bottom = lattice.bottom();
    let mut seen = HashSet::from([bottom]);
    let mut pending = VecDeque::from([bottom]);
    let mut visited = BTreeSet::new();
    let mut optimum: Option<(Vec<u32>, InformationLoss)> = None;

    while let Some(node) = pending.pop_front() {
        let transformation = lattice.transformation(node).to_vec();
        let result = checker
            .check(&transformation, CheckMode::Cached)
            .map_err(anonbench_search::SearchError::from)?;
        let improves = match &optimum {
            Some((_, best)) => result.information_loss < *best,
            None => true,
        };
        if result.anonymous && improves {
            optimum = Some((transformation.clone(), result.information_loss));
        }
        visited.insert(transformation);
        for successor in lattice.successors(node, false) {
            if seen.insert(successor) {
                pending.push_back(successor);
            }
        }
    }
    Ok(Baseline { optimum, visited })
}
