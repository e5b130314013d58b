//! Run reports and their on-disk form.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json   canonical JSON of the report
//!   run_digest.txt    "sha256:<hex>" over DOMAIN_RUN_REPORT || run_report.json
//! ```

use std::path::Path;

use serde::Serialize;

use crate::canon::{canonical_hash, canonical_json_bytes, to_canonical_bytes, DOMAIN_RUN_REPORT};
use crate::error::HarnessError;
use crate::runner::RunRecord;

pub const REPORT_FILENAME: &str = "run_report.json";
pub const DIGEST_FILENAME: &str = "run_digest.txt";

/// Ordered records of one benchmark session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub scenario: String,
    pub records: Vec<RunRecord>,
}

impl RunReport {
    #[must_use]
    pub fn new(scenario: impl Into<String>, records: Vec<RunRecord>) -> Self {
        Self {
            scenario: scenario.into(),
            records,
        }
    }

    /// # Errors
    ///
    /// Returns [`HarnessError::Canon`] if the report cannot be canonicalized.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, HarnessError> {
        Ok(to_canonical_bytes(self)?)
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// See [`RunReport::canonical_bytes`].
    pub fn digest(&self) -> Result<String, HarnessError> {
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &self.canonical_bytes()?))
    }

    /// Write the report and its digest into `dir`, creating it if needed.
    /// Returns the digest.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] on write failure.
    pub fn write_to(&self, dir: &Path) -> Result<String, HarnessError> {
        let bytes = self.canonical_bytes()?;
        let digest = canonical_hash(DOMAIN_RUN_REPORT, &bytes);
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(REPORT_FILENAME), &bytes)?;
        std::fs::write(dir.join(DIGEST_FILENAME), digest.as_bytes())?;
        Ok(digest)
    }
}

/// Re-hash a persisted report and compare with its stored digest.
///
/// Returns the digest. Fails if the report is not in canonical form or the
/// digest does not match.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] for missing files,
/// [`HarnessError::MalformedReport`] for unparseable JSON and
/// [`HarnessError::DigestMismatch`] when verification fails.
pub fn verify_dir(dir: &Path) -> Result<String, HarnessError> {
    let bytes = std::fs::read(dir.join(REPORT_FILENAME))?;
    let stored = std::fs::read_to_string(dir.join(DIGEST_FILENAME))?;
    let stored = stored.trim().to_string();

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| HarnessError::MalformedReport {
            detail: e.to_string(),
        })?;
    let canonical = canonical_json_bytes(&value)?;
    let recomputed = canonical_hash(DOMAIN_RUN_REPORT, &canonical);
    if canonical != bytes || recomputed != stored {
        return Err(HarnessError::DigestMismatch { stored, recomputed });
    }
    Ok(recomputed)
}
