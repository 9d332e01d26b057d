//! Single-slot memo for derived data
//!
//! Recomputes only when the selection key or any input revision changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct Slot<V> {
    key: String,
    revisions: Vec<u64>,
    value: Arc<V>,
}

pub struct Memo<V> {
    slot: Mutex<Option<Slot<V>>>,
    computations: AtomicU64,
}

impl<V> Memo<V> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            computations: AtomicU64::new(0),
        }
    }

    pub fn get_or_compute<F>(&self, key: &str, revisions: &[u64], compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(existing) = slot.as_ref() {
            if existing.key == key && existing.revisions == revisions {
                return existing.value.clone();
            }
        }

        let value = Arc::new(compute());
        self.computations.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Slot {
            key: key.to_string(),
            revisions: revisions.to_vec(),
            value: value.clone(),
        });
        value
    }

    /// How many times the value was computed
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for Memo<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("computations", &self.computations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_on_change_only() {
        let memo = Memo::<usize>::new();

        assert_eq!(*memo.get_or_compute("district_id=5", &[1, 1], || 10), 10);
        assert_eq!(*memo.get_or_compute("district_id=5", &[1, 1], || 99), 10);
        assert_eq!(memo.computations(), 1);

        assert_eq!(*memo.get_or_compute("district_id=5", &[2, 1], || 20), 20);
        assert_eq!(*memo.get_or_compute("district_id=6", &[2, 1], || 30), 30);
        assert_eq!(memo.computations(), 3);
    }
}
