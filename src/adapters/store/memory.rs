use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::domain::Sample;
use crate::ports::SampleStore;

/// In-memory sliding-window store for endpoint samples.
///
/// A single read/write lock covers the whole map: writers serialize with
/// each other and with snapshots, while any number of snapshots may run
/// concurrently as readers. The lock is held only for the append/truncate
/// or the copy, never across sensor reads.
pub struct MemoryStore {
    samples: RwLock<HashMap<String, VecDeque<Sample>>>,
    capacity: usize,
}

impl MemoryStore {
    /// `capacity` bounds the retained samples per endpoint; 0 retains
    /// everything.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: RwLock::new(HashMap::new()),
            capacity,
        }
    }
}

impl SampleStore for MemoryStore {
    fn add(&self, endpoint: &str, sample: Sample) {
        if sample.is_zero() {
            return;
        }

        let mut samples = self.samples.write().unwrap();
        let window = samples
            .entry(endpoint.to_string())
            .or_insert_with(VecDeque::new);

        window.push_back(sample);
        if self.capacity > 0 {
            while window.len() > self.capacity {
                window.pop_front();
            }
        }
    }

    fn snapshot(&self) -> HashMap<String, Vec<Sample>> {
        let samples = self.samples.read().unwrap();
        samples
            .iter()
            .map(|(endpoint, window)| (endpoint.clone(), window.iter().cloned().collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn keeps_only_the_last_capacity_samples() {
        let store = MemoryStore::new(2);
        store.add("ep1", Sample::new(100, 200, 5, 9));
        store.add("ep1", Sample::new(300, 400, 9, 15));
        store.add("ep1", Sample::new(500, 600, 15, 20));

        let snap = store.snapshot();
        assert_eq!(
            snap["ep1"],
            vec![Sample::new(300, 400, 9, 15), Sample::new(500, 600, 15, 20)]
        );
    }

    #[test]
    fn zero_capacity_grows_without_bound() {
        let store = MemoryStore::new(0);
        for i in 0..500 {
            store.add("ep1", Sample::new(i + 1, i + 2, 0, 0));
        }
        assert_eq!(store.snapshot()["ep1"].len(), 500);
    }

    #[test]
    fn zero_sample_is_a_silent_no_op() {
        let store = MemoryStore::new(4);
        store.add("ep1", Sample::new(0, 0, 7, 9));
        assert!(store.snapshot().is_empty(), "no key for a zero sample");

        store.add("ep1", Sample::new(100, 200, 5, 9));
        store.add("ep1", Sample::new(0, 0, 11, 13));
        assert_eq!(store.snapshot()["ep1"], vec![Sample::new(100, 200, 5, 9)]);
    }

    #[test]
    fn empty_store_snapshots_to_empty_map() {
        let store = MemoryStore::new(4);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn empty_endpoint_name_is_a_valid_key() {
        let store = MemoryStore::new(4);
        store.add("", Sample::new(1, 2, 0, 0));
        assert_eq!(store.snapshot()[""].len(), 1);
    }

    #[test]
    fn snapshot_is_independent_of_later_writes() {
        let store = MemoryStore::new(4);
        store.add("ep1", Sample::new(100, 200, 5, 9));

        let mut first = store.snapshot();
        first.get_mut("ep1").unwrap().push(Sample::new(1, 2, 3, 4));
        first.insert("bogus".to_string(), vec![Sample::new(9, 9, 9, 9)]);

        let second = store.snapshot();
        assert_eq!(second.len(), 1);
        assert_eq!(second["ep1"], vec![Sample::new(100, 200, 5, 9)]);
    }

    #[test]
    fn eviction_preserves_insertion_order() {
        let store = MemoryStore::new(3);
        for i in 0..10i64 {
            store.add("ep1", Sample::new(i * 10 + 1, i * 10 + 2, i, i + 1));
        }
        let tail: Vec<i64> = store.snapshot()["ep1"].iter().map(|s| s.start).collect();
        assert_eq!(tail, vec![71, 81, 91]);
    }

    #[test]
    fn concurrent_adds_to_distinct_endpoints() {
        let store = Arc::new(MemoryStore::new(0));
        let mut handles = Vec::new();
        for t in 0..4i64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    store.add(&format!("ep{}", t), Sample::new(i + 1, i + 2, 0, 0));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = store.snapshot();
        assert_eq!(snap.len(), 4);
        for t in 0..4 {
            assert_eq!(snap[&format!("ep{}", t)].len(), 100);
        }
    }

    #[test]
    fn concurrent_adds_to_one_endpoint_respect_the_bound() {
        let store = Arc::new(MemoryStore::new(50));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    store.add("shared", Sample::new(i + 1, i + 2, 0, 0));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot()["shared"].len(), 50);
    }
}
