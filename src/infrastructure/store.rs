//! Counter storage for the accumulation throttle.
//!
//! Backed by DashMap: lock-free reads and fine-grained per-shard locking for
//! writes. The `entry` API holds the shard lock across the whole
//! increment/compare/delete step, which is what makes
//! [`CounterStore::increment_and_trip`] a single atomic step per key.

use crate::application::ports::{CounterStore, ThrottleKey};
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Thread-safe sharded counter store.
#[derive(Debug, Default)]
pub struct DashCounterStore {
    map: DashMap<ThrottleKey, u32, RandomState>,
}

impl DashCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        DashCounterStore {
            map: DashMap::with_hasher(RandomState::new()),
        }
    }
}

impl CounterStore for DashCounterStore {
    fn increment_and_trip(&self, key: ThrottleKey, threshold: u32) -> bool {
        match self.map.entry(key) {
            Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                *count += 1;
                if *count >= threshold {
                    // Deleted on trip so the next event starts a fresh cycle,
                    // not reset to zero
                    entry.remove();
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                // First event of a cycle: counter conceptually starts at zero
                // and this increment brings it to one
                if threshold <= 1 {
                    true
                } else {
                    entry.insert(1);
                    false
                }
            }
        }
    }

    fn count(&self, key: &ThrottleKey) -> Option<u32> {
        self.map.get(key).map(|entry| *entry)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn clear(&self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::owner::Owner;

    fn key(name: &'static str) -> ThrottleKey {
        ThrottleKey::new(Owner::named("tests::store"), name)
    }

    #[test]
    fn test_counts_up_to_threshold() {
        let store = DashCounterStore::new();

        assert!(!store.increment_and_trip(key("T"), 3));
        assert_eq!(store.count(&key("T")), Some(1));
        assert!(!store.increment_and_trip(key("T"), 3));
        assert_eq!(store.count(&key("T")), Some(2));
        assert!(store.increment_and_trip(key("T"), 3));
        assert_eq!(store.count(&key("T")), None);
    }

    #[test]
    fn test_zero_and_one_thresholds_never_store() {
        let store = DashCounterStore::new();

        assert!(store.increment_and_trip(key("A"), 0));
        assert!(store.increment_and_trip(key("A"), 1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let store = DashCounterStore::new();

        store.increment_and_trip(key("A"), 5);
        store.increment_and_trip(key("B"), 5);
        store.increment_and_trip(key("B"), 5);

        assert_eq!(store.count(&key("A")), Some(1));
        assert_eq!(store.count(&key("B")), Some(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_owner_scopes_the_key() {
        let store = DashCounterStore::new();
        let alice = ThrottleKey::new(Owner::named("alice"), "T");
        let bob = ThrottleKey::new(Owner::named("bob"), "T");

        store.increment_and_trip(alice.clone(), 5);
        assert_eq!(store.count(&alice), Some(1));
        assert_eq!(store.count(&bob), None);
    }

    #[test]
    fn test_clear() {
        let store = DashCounterStore::new();
        store.increment_and_trip(key("A"), 5);
        store.increment_and_trip(key("B"), 5);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.count(&key("A")), None);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(DashCounterStore::new());
        let mut handles = vec![];

        // 10 threads x 50 increments at threshold 500: exactly one trip on
        // the 500th increment, no lost updates
        for _ in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                (0..50)
                    .filter(|_| store.increment_and_trip(key("T"), 500))
                    .count()
            }));
        }

        let trips: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(trips, 1);
        assert_eq!(store.count(&key("T")), None);
    }
}
