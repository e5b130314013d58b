//! Capacity-bounded frontier with best-first extraction and worst-first eviction.
//!
//! Entries live in one `BTreeSet<(P, T)>` ordered by priority, ties broken by
//! the item's own order (node creation order for [`NodeId`] frontiers). Both
//! ends of the set are O(log n) to reach, so the minimum view and the maximum
//! view cannot drift apart. A `HashMap<T, P>` membership index makes identity
//! lookups and targeted removal O(log n) as well.
//!
//! Capacity is enforced by the caller: after inserting, call
//! [`BoundedDualQueue::evict_overflow`]. Evicted items are gone for good.
//!
//! [`NodeId`]: anonbench_lattice::NodeId

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Default frontier capacity.
pub const DEFAULT_CAPACITY: usize = 50_000;

/// Min-max priority queue without duplicates.
#[derive(Debug, Clone)]
pub struct BoundedDualQueue<T, P> {
    ordered: BTreeSet<(P, T)>,
    members: HashMap<T, P>,
    capacity: usize,
    high_water: usize,
}

impl<T, P> BoundedDualQueue<T, P>
where
    T: Copy + Ord + Hash,
    P: Copy + Ord,
{
    /// Create an empty queue that holds at most `capacity` items after
    /// [`evict_overflow`](Self::evict_overflow).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            ordered: BTreeSet::new(),
            members: HashMap::new(),
            capacity,
            high_water: 0,
        }
    }

    /// Insert `item` with `priority`.
    ///
    /// Returns `false` and leaves the queue untouched if `item` is already a
    /// member, whatever its priority.
    pub fn push(&mut self, item: T, priority: P) -> bool {
        if self.members.contains_key(&item) {
            return false;
        }
        self.members.insert(item, priority);
        self.ordered.insert((priority, item));
        self.high_water = self.high_water.max(self.ordered.len());
        true
    }

    /// Remove and return the best (lowest priority) item.
    pub fn pop_min(&mut self) -> Option<T> {
        let (_, item) = self.ordered.pop_first()?;
        self.members.remove(&item);
        Some(item)
    }

    /// Remove and return the worst (highest priority) item.
    pub fn remove_max(&mut self) -> Option<T> {
        let (_, item) = self.ordered.pop_last()?;
        self.members.remove(&item);
        Some(item)
    }

    /// Remove a specific item. Returns `false` if it was not a member.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.members.remove(item) {
            Some(priority) => self.ordered.remove(&(priority, *item)),
            None => false,
        }
    }

    /// Whether `item` is currently queued.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.members.contains_key(item)
    }

    /// The best item without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<(&T, &P)> {
        self.ordered.first().map(|(p, t)| (t, p))
    }

    /// Drop worst items until `len() <= capacity()`. Returns them worst first.
    pub fn evict_overflow(&mut self) -> Vec<T> {
        let mut evicted = Vec::new();
        while self.ordered.len() > self.capacity {
            match self.remove_max() {
                Some(item) => evicted.push(item),
                None => break,
            }
        }
        evicted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest size the queue reached, including overflow before eviction.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
