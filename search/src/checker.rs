//! The checker contract: feasibility and information loss of a transformation.
//!
//! The checker is an external collaborator. It owns the privacy criteria,
//! the loss metric and any history cache it keeps between checks; the engine
//! only sees [`CheckResult`]s.

use anonbench_lattice::InformationLoss;

/// Outcome of evaluating one transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Whether the transformation satisfies every configured criterion.
    pub anonymous: bool,
    pub information_loss: InformationLoss,
}

/// Whether a check may be answered from the checker's own cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    Cached,
    /// Discard any cached payload for the transformation and evaluate afresh.
    ForceRecompute,
}

/// Which evaluated transformations the checker's history cache retains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageTrigger {
    /// Keep snapshots of every evaluated transformation.
    #[default]
    All,
    NonAnonymous,
    Anonymous,
}

/// Failure reported by a checker. Never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckerError {
    /// The transformation does not match the checker's attribute layout.
    #[error("malformed transformation {transformation:?}: expected {expected} levels")]
    MalformedTransformation {
        transformation: Vec<u32>,
        expected: usize,
    },
    #[error("check failed: {detail}")]
    Failed { detail: String },
}

/// Evaluates transformations against privacy criteria and a loss metric.
///
/// Checks must be deterministic: the same transformation always yields the
/// same answer, whether served from cache or recomputed.
pub trait Checker {
    /// Evaluate `transformation`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError`] if the transformation is malformed or the
    /// evaluation itself fails.
    fn check(
        &mut self,
        transformation: &[u32],
        mode: CheckMode,
    ) -> Result<CheckResult, CheckerError>;

    /// Whether the loss metric is non-decreasing along the lattice order.
    fn metric_is_monotonic(&self) -> bool;

    /// Upper bound on suppressed records, as configured.
    fn max_allowed_outliers(&self) -> f64;

    /// Configure the history cache's storage policy.
    fn set_storage_trigger(&mut self, trigger: StorageTrigger);
}
