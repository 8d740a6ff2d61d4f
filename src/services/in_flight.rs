use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

pub const OPERATION_ID_HEADER: &str = "X-Operation-Id";

type Key = (i32, String);

/// Process-wide registry of client operation ids that are currently being handled.
#[derive(Clone, Default)]
pub struct InFlightRequests {
    active: Arc<DashMap<Key, DateTime<Utc>>>,
}

impl InFlightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `operation_id` for `user_id`. Returns `None` while the same pair is in flight.
    /// The claim is released when the returned guard is dropped.
    pub fn begin(&self, user_id: i32, operation_id: &str) -> Option<InFlightGuard> {
        let key = (user_id, operation_id.to_string());
        match self.active.entry(key.clone()) {
            Entry::Occupied(entry) => {
                warn!(
                    "IN_FLIGHT: begin(): duplicate operation '{}' from user {} (started {})",
                    operation_id,
                    user_id,
                    entry.get()
                );
                None
            }
            Entry::Vacant(entry) => {
                entry.insert(Utc::now());
                Some(InFlightGuard {
                    active: self.active.clone(),
                    key,
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

pub struct InFlightGuard {
    active: Arc<DashMap<Key, DateTime<Utc>>>,
    key: Key,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_refused_until_released() {
        let registry = InFlightRequests::new();
        let guard = registry.begin(1, "op-1");
        assert!(guard.is_some());
        assert!(registry.begin(1, "op-1").is_none());
        drop(guard);
        assert!(registry.is_empty());
        assert!(registry.begin(1, "op-1").is_some());
    }

    #[test]
    fn keys_are_scoped_per_user() {
        let registry = InFlightRequests::new();
        let _a = registry.begin(1, "op").unwrap();
        let _b = registry.begin(2, "op").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn clones_share_state() {
        let registry = InFlightRequests::new();
        let other = registry.clone();
        let _guard = registry.begin(7, "x").unwrap();
        assert!(other.begin(7, "x").is_none());
    }
}
