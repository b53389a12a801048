//! Sparse cache of proven chain positions.

use std::collections::BTreeMap;

use crate::game::SeedHash;

/// Map from sequence number to a seed hash already proven to lie on the chain.
///
/// Holds the permanent periodic slots discovered while walking plus one
/// entry for the current anchor. Any hash stored here, hashed forward
/// `a - b` times, reproduces the entry at `b` for every smaller proven `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointCache {
    entries: BTreeMap<u64, SeedHash>,
}

impl CheckpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sequence: u64) -> Option<&SeedHash> {
        self.entries.get(&sequence)
    }

    pub fn contains(&self, sequence: u64) -> bool {
        self.entries.contains_key(&sequence)
    }

    pub fn insert(&mut self, sequence: u64, hash: SeedHash) {
        self.entries.insert(sequence, hash);
    }

    pub fn remove(&mut self, sequence: u64) -> Option<SeedHash> {
        self.entries.remove(&sequence)
    }

    /// The closest checkpoint at or above `sequence`.
    pub fn nearest_at_or_above(&self, sequence: u64) -> Option<(u64, SeedHash)> {
        self.entries
            .range(sequence..)
            .next()
            .map(|(seq, hash)| (*seq, *hash))
    }

    /// Highest cached position.
    pub fn last(&self) -> Option<(u64, SeedHash)> {
        self.entries
            .iter()
            .next_back()
            .map(|(seq, hash)| (*seq, *hash))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &SeedHash)> + '_ {
        self.entries.iter().map(|(seq, hash)| (*seq, hash))
    }
}

impl Extend<(u64, SeedHash)> for CheckpointCache {
    fn extend<I: IntoIterator<Item = (u64, SeedHash)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(byte: u8) -> SeedHash {
        SeedHash([byte; 32])
    }

    #[test]
    fn should_find_nearest_checkpoint_above() {
        let mut cache = CheckpointCache::new();
        cache.extend([(1000, h(1)), (2000, h(2)), (2999, h(3))]);

        assert_eq!(cache.nearest_at_or_above(0), Some((1000, h(1))));
        assert_eq!(cache.nearest_at_or_above(1000), Some((1000, h(1))));
        assert_eq!(cache.nearest_at_or_above(1001), Some((2000, h(2))));
        assert_eq!(cache.nearest_at_or_above(2005), Some((2999, h(3))));
        assert_eq!(cache.nearest_at_or_above(3000), None);
        assert_eq!(cache.last(), Some((2999, h(3))));
    }

    #[test]
    fn should_insert_and_remove() {
        let mut cache = CheckpointCache::new();
        assert!(cache.is_empty());

        cache.insert(7, h(7));
        assert!(cache.contains(7));
        assert_eq!(cache.get(7), Some(&h(7)));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.remove(7), Some(h(7)));
        assert!(!cache.contains(7));
        assert_eq!(cache.remove(7), None);
    }

    #[test]
    fn should_iterate_in_order() {
        let mut cache = CheckpointCache::new();
        cache.extend([(30, h(3)), (10, h(1)), (20, h(2))]);
        let order: Vec<u64> = cache.iter().map(|(seq, _)| seq).collect();
        assert_eq!(order, vec![10, 20, 30]);
    }
}
