//! # Subscription registry — per-key priority buckets.
//!
//! The registry maps each topic key to a `BTreeMap<i32, Vec<SubscriberRef>>`:
//! the `BTreeMap` *is* the per-key, deduplicated, ascending priority list,
//! and each `Vec` bucket preserves insertion order as the same-priority
//! tie-break. Keeping the priority order per key (instead of one global
//! sorted list) means dispatch for key K only ever visits buckets that exist
//! for K — subscribers on other keys sharing a priority value are never
//! touched, and no priority is visited twice.
//!
//! ## Rules
//! - `insert` is append-only; there is no unsubscribe.
//! - Inserting the same subscriber object twice yields two bucket entries
//!   and therefore two invocations per dispatch (not idempotent).
//! - `lookup` returns an owned snapshot, so no lock is held while handlers
//!   run and readers never observe a bucket mid-resize.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::events::EventKey;
use crate::subscribers::SubscriberRef;

/// Priority-ordered buckets for one topic key.
type Buckets = BTreeMap<i32, Vec<SubscriberRef>>;

/// Shared subscription store, keyed by topic.
///
/// All mutation goes through the write lock; the dispatch path takes the
/// read lock only long enough to clone the matching subscriber handles.
pub(crate) struct Registry {
    topics: RwLock<HashMap<EventKey, Buckets>>,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts the subscriber into the bucket for `(key, priority)`,
    /// creating the key entry and the bucket as needed.
    pub(crate) async fn insert(&self, subscriber: SubscriberRef) {
        let key = subscriber.key().clone();
        let priority = subscriber.priority();

        let mut topics = self.topics.write().await;
        topics
            .entry(key)
            .or_default()
            .entry(priority)
            .or_default()
            .push(subscriber);
    }

    /// Returns all subscribers for `key`, flattened ascending-by-priority,
    /// insertion order within a priority.
    ///
    /// Unknown keys yield an empty vec, never an error.
    pub(crate) async fn lookup(&self, key: &EventKey) -> Vec<SubscriberRef> {
        let topics = self.topics.read().await;
        match topics.get(key) {
            Some(buckets) => buckets.values().flatten().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Returns the number of subscribers registered for `key`.
    pub(crate) async fn subscriber_count(&self, key: &EventKey) -> usize {
        let topics = self.topics.read().await;
        topics
            .get(key)
            .map(|buckets| buckets.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Returns the sorted list of topic keys with at least one subscriber.
    pub(crate) async fn topics(&self) -> Vec<EventKey> {
        let topics = self.topics.read().await;
        let mut keys: Vec<EventKey> = topics.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::HandlerError;
    use crate::events::EventRef;
    use crate::subscribers::Subscribe;

    struct Probe {
        key: EventKey,
        priority: i32,
        tag: &'static str,
    }

    #[async_trait]
    impl Subscribe for Probe {
        fn key(&self) -> &EventKey {
            &self.key
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn name(&self) -> &str {
            self.tag
        }

        async fn handle(&self, _event: EventRef) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    fn probe(key: &str, priority: i32, tag: &'static str) -> SubscriberRef {
        Arc::new(Probe {
            key: key.into(),
            priority,
            tag,
        })
    }

    async fn names(registry: &Registry, key: &str) -> Vec<String> {
        registry
            .lookup(&key.into())
            .await
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn insert_groups_by_key_and_priority() {
        let registry = Registry::new();
        registry.insert(probe("orders", 0, "a")).await;
        registry.insert(probe("orders", 0, "b")).await;
        registry.insert(probe("orders", 5, "c")).await;
        registry.insert(probe("billing", 0, "d")).await;

        assert_eq!(registry.subscriber_count(&"orders".into()).await, 3);
        assert_eq!(registry.subscriber_count(&"billing".into()).await, 1);
        assert_eq!(
            registry.topics().await,
            vec![EventKey::from("billing"), EventKey::from("orders")]
        );
    }

    #[tokio::test]
    async fn lookup_flattens_ascending_priority_then_insertion_order() {
        let registry = Registry::new();
        registry.insert(probe("orders", 1, "p1")).await;
        registry.insert(probe("orders", 2, "p2")).await;
        registry.insert(probe("orders", -1, "p-1")).await;
        registry.insert(probe("orders", 0, "p0a")).await;
        registry.insert(probe("orders", 0, "p0b")).await;

        assert_eq!(
            names(&registry, "orders").await,
            vec!["p-1", "p0a", "p0b", "p1", "p2"]
        );
    }

    #[tokio::test]
    async fn lookup_unknown_key_is_empty() {
        let registry = Registry::new();
        registry.insert(probe("orders", 0, "a")).await;

        assert!(registry.lookup(&"missing".into()).await.is_empty());
        assert_eq!(registry.subscriber_count(&"missing".into()).await, 0);
    }

    #[tokio::test]
    async fn shared_priority_values_do_not_cross_keys() {
        // Both keys populate priority 5: lookup must stay inside one key's
        // buckets and must not double-visit the shared priority value.
        let registry = Registry::new();
        registry.insert(probe("orders", 5, "orders-sub")).await;
        registry.insert(probe("billing", 5, "billing-sub")).await;
        registry.insert(probe("orders", 5, "orders-sub2")).await;

        assert_eq!(
            names(&registry, "orders").await,
            vec!["orders-sub", "orders-sub2"]
        );
        assert_eq!(names(&registry, "billing").await, vec!["billing-sub"]);
    }

    #[tokio::test]
    async fn duplicate_subscription_yields_two_entries() {
        let registry = Registry::new();
        let sub = probe("orders", 0, "dup");
        registry.insert(Arc::clone(&sub)).await;
        registry.insert(sub).await;

        assert_eq!(registry.subscriber_count(&"orders".into()).await, 2);
    }

    #[tokio::test]
    async fn concurrent_inserts_all_land() {
        let registry = Arc::new(Registry::new());
        let mut joins = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            joins.push(tokio::spawn(async move {
                registry.insert(probe("orders", i % 4, "worker")).await;
            }));
        }
        for join in joins {
            join.await.expect("insert task panicked");
        }

        assert_eq!(registry.subscriber_count(&"orders".into()).await, 16);
        assert_eq!(registry.lookup(&"orders".into()).await.len(), 16);
    }
}
