//! Traversal policy and the named strategy presets.

use serde::Serialize;

use crate::error::SearchError;
use crate::queue::DEFAULT_CAPACITY;

/// Traversal configuration.
///
/// The two benchmark strategies differ only in these values; see
/// [`Strategy::policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraversalPolicy {
    /// Which successors an expansion enumerates.
    pub successor_mode: SuccessorMode,
    /// How often an expansion becomes a depth-first dive.
    pub stepping: Stepping,
    /// Frontier capacity; worst entries beyond it are evicted.
    pub max_queue_size: usize,
}

impl TraversalPolicy {
    /// Reject out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero queue size or a
    /// zero fixed stepping.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_queue_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_queue_size must be at least 1".into(),
            });
        }
        if self.stepping == Stepping::Every(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "fixed stepping must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        Strategy::Heurakles.policy()
    }
}

/// Successor enumeration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessorMode {
    /// Only successors the lattice reports as candidates (not completed,
    /// not upward-pruned). Saves work when a node has several predecessors.
    Candidates,
    /// Every direct successor.
    All,
}

impl SuccessorMode {
    #[must_use]
    pub fn candidates_only(self) -> bool {
        self == Self::Candidates
    }
}

/// Dive cadence: every `n`-th expansion runs a full depth-first dive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stepping {
    /// `n` = level of the lattice top, at least 1.
    LatticeHeight,
    /// Fixed `n`; must be positive.
    Every(u32),
}

/// Named traversal strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Candidate successors, dive once per lattice height.
    Heurakles,
    /// All successors, dive once per lattice height.
    ImprovedGreedy,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Heurakles, Strategy::ImprovedGreedy];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Heurakles => "heurakles",
            Self::ImprovedGreedy => "improved-greedy",
        }
    }

    #[must_use]
    pub fn policy(self) -> TraversalPolicy {
        let successor_mode = match self {
            Self::Heurakles => SuccessorMode::Candidates,
            Self::ImprovedGreedy => SuccessorMode::All,
        };
        TraversalPolicy {
            successor_mode,
            stepping: Stepping::LatticeHeight,
            max_queue_size: DEFAULT_CAPACITY,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| SearchError::UnknownStrategy { name: s.to_string() })
    }
}
