//! Bounded memory of recently processed webhook event ids.
//!
//! The platform redelivers events whose webhook response it did not receive in
//! time. Remembering the last few ids lets a redelivered event become a no-op.
//! Process-local and best-effort: a restart or a long gap forgets everything.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
struct SeenIds {
    order: VecDeque<String>,
    ids: HashSet<String>,
}

#[derive(Debug)]
pub struct RedeliveryGuard {
    capacity: usize,
    seen: Mutex<SeenIds>,
}

impl RedeliveryGuard {
    /// A guard remembering up to `capacity` ids; zero disables it.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seen: Mutex::new(SeenIds::default()),
        }
    }

    /// Record `id`; returns `false` if it was already seen.
    pub fn first_sighting(&self, id: &str) -> bool {
        if self.capacity == 0 {
            return true;
        }

        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.ids.contains(id) {
            return false;
        }

        if seen.order.len() == self.capacity {
            if let Some(oldest) = seen.order.pop_front() {
                seen.ids.remove(&oldest);
            }
        }
        seen.order.push_back(id.to_string());
        seen.ids.insert(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_sighting_is_rejected() {
        let guard = RedeliveryGuard::new(8);
        assert!(guard.first_sighting("a"));
        assert!(!guard.first_sighting("a"));
        assert!(guard.first_sighting("b"));
    }

    #[test]
    fn test_oldest_id_is_forgotten() {
        let guard = RedeliveryGuard::new(2);
        assert!(guard.first_sighting("a"));
        assert!(guard.first_sighting("b"));
        assert!(guard.first_sighting("c"));
        assert!(guard.first_sighting("a"));
        assert!(!guard.first_sighting("c"));
    }

    #[test]
    fn test_zero_capacity_disables() {
        let guard = RedeliveryGuard::new(0);
        assert!(guard.first_sighting("a"));
        assert!(guard.first_sighting("a"));
    }
}
