//! Node identity and the lattice order on transformations.

/// Dense identifier of a lattice node.
///
/// Ids are assigned by the lattice in creation order, so comparing two ids
/// compares their discovery order. Ids are only meaningful for the lattice
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The arena index this id refers to.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns `true` if `upper` generalizes `lower` in every attribute.
///
/// This is the lattice order `lower ≤ upper`. Transformations of different
/// arity are never comparable.
#[must_use]
pub fn dominates(upper: &[u32], lower: &[u32]) -> bool {
    upper.len() == lower.len() && upper.iter().zip(lower).all(|(u, l)| u >= l)
}
