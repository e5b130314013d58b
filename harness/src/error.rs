//! Harness errors.

use anonbench_lattice::LatticeError;
use anonbench_search::SearchError;

use crate::canon::CanonError;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A metric name matched no [`crate::setup::MetricKind`].
    #[error("unknown metric `{name}`")]
    UnknownMetric { name: String },
    /// A criterion name matched no [`crate::setup::Criterion`].
    #[error("unknown criterion `{name}`")]
    UnknownCriterion { name: String },
    /// A benchmark configuration field is out of range.
    #[error("invalid benchmark configuration: {detail}")]
    InvalidConfig { detail: String },
    /// A persisted report is not valid JSON.
    #[error("malformed report: {detail}")]
    MalformedReport { detail: String },
    /// A persisted report does not match its stored digest.
    #[error("digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
}
