//! Accumulation throttling.
//!
//! High-frequency repeated events are suppressed so that only every Nth
//! occurrence per (owner, template) key is actually emitted. The counter
//! update is a single atomic step per key: concurrent callers can neither
//! double-trip nor lose increments, so N events at threshold T produce
//! exactly `floor(N / T)` trips under any interleaving.

use crate::application::metrics::Metrics;
use crate::application::ports::{CounterStore, ThrottleKey};
use crate::domain::owner::Owner;
use crate::domain::template::Template;

/// Suppresses all but every Nth occurrence of an event per key.
///
/// Generic over the counter store so tests can substitute instrumented
/// implementations; production uses `Arc<DashCounterStore>`.
///
/// Counters are created on demand and deleted when they trip; a counter for
/// a key that stops occurring lives indefinitely (no TTL or eviction).
#[derive(Debug, Clone)]
pub struct AccumulationThrottle<S>
where
    S: CounterStore + Clone,
{
    store: S,
    metrics: Metrics,
}

impl<S> AccumulationThrottle<S>
where
    S: CounterStore + Clone,
{
    /// Create a throttle over a counter store.
    pub fn new(store: S, metrics: Metrics) -> Self {
        AccumulationThrottle { store, metrics }
    }

    /// Register one occurrence and decide whether this one should be emitted.
    ///
    /// Increments the counter for (owner, template name), creating it at zero
    /// if absent. Returns `true` when the post-increment count reaches the
    /// template's threshold — the counter is deleted so the next occurrence
    /// starts a fresh cycle. Thresholds 0 and 1 trip on every call.
    ///
    /// This operation cannot fail; it is pure in-memory bookkeeping.
    pub fn should_emit(&self, owner: &Owner, template: &Template) -> bool {
        let key = ThrottleKey::new(owner.clone(), template.name);
        let tripped = self.store.increment_and_trip(key, template.threshold);
        if !tripped {
            self.metrics.record_suppressed();
        }
        tripped
    }

    /// Current count for a key, if a cycle is in progress.
    pub fn pending(&self, owner: &Owner, template: &Template) -> Option<u32> {
        self.store
            .count(&ThrottleKey::new(owner.clone(), template.name))
    }

    /// Number of live counters.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no counters are live.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop all counters, restarting every cycle.
    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::DashCounterStore;
    use std::sync::Arc;

    const EVERY_3: Template = Template::with_threshold("EVERY_3", "tick {}", 3);
    const ALWAYS_0: Template = Template::with_threshold("ALWAYS_0", "tick {}", 0);
    const ALWAYS_1: Template = Template::with_threshold("ALWAYS_1", "tick {}", 1);

    fn throttle() -> AccumulationThrottle<Arc<DashCounterStore>> {
        AccumulationThrottle::new(Arc::new(DashCounterStore::new()), Metrics::new())
    }

    #[test]
    fn test_trips_every_nth_and_restarts() {
        let throttle = throttle();
        let owner = Owner::named("tests::throttle");

        // Threshold 3, 7 events: trips at the 3rd and 6th, the 7th starts a
        // fresh cycle at count 1
        let decisions: Vec<bool> = (0..7).map(|_| throttle.should_emit(&owner, &EVERY_3)).collect();
        assert_eq!(decisions, [false, false, true, false, false, true, false]);
        assert_eq!(throttle.pending(&owner, &EVERY_3), Some(1));
    }

    #[test]
    fn test_counter_deleted_on_trip() {
        let throttle = throttle();
        let owner = Owner::named("tests::throttle");

        throttle.should_emit(&owner, &EVERY_3);
        throttle.should_emit(&owner, &EVERY_3);
        assert_eq!(throttle.len(), 1);

        assert!(throttle.should_emit(&owner, &EVERY_3));
        // Deleted, not reset to zero
        assert_eq!(throttle.len(), 0);
        assert_eq!(throttle.pending(&owner, &EVERY_3), None);
    }

    #[test]
    fn test_threshold_zero_and_one_always_emit() {
        let throttle = throttle();
        let owner = Owner::named("tests::throttle");

        for _ in 0..5 {
            assert!(throttle.should_emit(&owner, &ALWAYS_0));
            assert!(throttle.should_emit(&owner, &ALWAYS_1));
        }
        // Always-emit templates never materialize a counter
        assert!(throttle.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let throttle = throttle();
        let alice = Owner::named("alice");
        let bob = Owner::named("bob");

        assert!(!throttle.should_emit(&alice, &EVERY_3));
        assert!(!throttle.should_emit(&alice, &EVERY_3));
        // Bob's counter is separate from Alice's
        assert!(!throttle.should_emit(&bob, &EVERY_3));
        assert!(throttle.should_emit(&alice, &EVERY_3));
        assert_eq!(throttle.pending(&bob, &EVERY_3), Some(1));
    }

    #[test]
    fn test_suppressions_are_counted() {
        let metrics = Metrics::new();
        let throttle = AccumulationThrottle::new(Arc::new(DashCounterStore::new()), metrics.clone());
        let owner = Owner::named("tests::throttle");

        for _ in 0..7 {
            throttle.should_emit(&owner, &EVERY_3);
        }
        // 7 events, 2 trips, 5 suppressions
        assert_eq!(metrics.suppressed(), 5);
    }

    #[test]
    fn test_concurrent_trips_are_exact() {
        use std::thread;

        let throttle = Arc::new(throttle());
        let owner = Owner::named("tests::concurrent");

        // 8 threads x 75 events = 600 events at threshold 3 => exactly 200 trips
        let mut handles = vec![];
        for _ in 0..8 {
            let throttle = Arc::clone(&throttle);
            let owner = owner.clone();
            handles.push(thread::spawn(move || {
                (0..75)
                    .filter(|_| throttle.should_emit(&owner, &EVERY_3))
                    .count()
            }));
        }

        let trips: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(trips, 200);
        // 600 events consumed exactly by 200 full cycles; no residue
        assert_eq!(throttle.pending(&owner, &EVERY_3), None);
    }

    #[test]
    fn test_clear_restarts_cycles() {
        let throttle = throttle();
        let owner = Owner::named("tests::throttle");

        throttle.should_emit(&owner, &EVERY_3);
        throttle.should_emit(&owner, &EVERY_3);
        throttle.clear();
        assert!(throttle.is_empty());

        // Fresh cycle after clear
        assert!(!throttle.should_emit(&owner, &EVERY_3));
        assert_eq!(throttle.pending(&owner, &EVERY_3), Some(1));
    }
}
