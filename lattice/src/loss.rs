//! Information-loss scores.

/// A totally ordered information-loss value. Lower is better.
///
/// Wraps an `f64` and orders it with [`f64::total_cmp`], so every value
/// (including NaN) has a well-defined position and the type can key ordered
/// collections.
#[derive(Debug, Clone, Copy)]
pub struct InformationLoss(f64);

impl InformationLoss {
    /// Wrap a raw loss value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw loss value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for InformationLoss {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for InformationLoss {}

impl PartialOrd for InformationLoss {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InformationLoss {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for InformationLoss {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for InformationLoss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
