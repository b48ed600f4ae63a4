use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, trace};

/// Map from key to a value that is populated at most once.
///
/// Each key owns a slot. The map lock is held only while the slot is looked
/// up, so different keys never wait on each other. Concurrent callers for
/// the same key share the slot's once-cell: one of them runs the populate
/// future, the rest wait for its result. A failed populate leaves the slot
/// empty and the next caller tries again.
pub struct KeyedCache<V> {
    name: &'static str,
    slots: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
}

impl<V: Clone + Send + Sync> KeyedCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    async fn slot(&self, key: &str) -> Arc<OnceCell<V>> {
        let mut slots = self.slots.lock().await;
        slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// The cached value, without populating.
    pub async fn get(&self, key: &str) -> Option<V> {
        let slots = self.slots.lock().await;
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Returns the cached value for `key`, running `populate` if the key
    /// has no value yet and nobody else is already populating it.
    pub async fn get_or_populate<F, Fut, E>(&self, key: &str, populate: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(key).await;
        if let Some(value) = slot.get() {
            trace!("{} cache hit for {}", self.name, key);
            return Ok(value.clone());
        }

        let value = slot
            .get_or_try_init(|| {
                debug!("{} cache miss for {}, populating", self.name, key);
                populate()
            })
            .await?;
        Ok(value.clone())
    }

    /// Drops the entry so the next lookup populates again. Callers already
    /// waiting on an in-flight populate still receive its result.
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.slots.lock().await.remove(key);
        let had_value = removed.map_or(false, |slot| slot.initialized());
        if had_value {
            debug!("{} cache entry for {} invalidated", self.name, key);
        }
        had_value
    }

    /// Number of populated entries.
    pub async fn len(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_lookup_is_a_hit() {
        let cache = KeyedCache::<u32>::new("test");
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_populate("a", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("a").await, Some(7));
    }

    #[tokio::test]
    async fn test_failure_leaves_key_empty() {
        let cache = KeyedCache::<u32>::new("test");

        let first = cache
            .get_or_populate("a", || async { Err::<u32, _>("offline") })
            .await;
        assert_eq!(first, Err("offline"));
        assert_eq!(cache.get("a").await, None);
        assert!(cache.is_empty().await);

        let second = cache
            .get_or_populate("a", || async { Ok::<_, &str>(3) })
            .await;
        assert_eq!(second, Ok(3));
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_populate() {
        let cache = Arc::new(KeyedCache::<String>::new("test"));
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                let calls = calls.clone();
                tokio::spawn(async move {
                    cache
                        .get_or_populate("sm9", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok::<_, ()>("watch".to_string())
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok("watch".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = KeyedCache::<u32>::new("test");
        cache
            .get_or_populate("a", || async { Ok::<_, ()>(1) })
            .await
            .unwrap();

        assert!(cache.invalidate("a").await);
        assert!(!cache.invalidate("a").await);

        let value = cache
            .get_or_populate("a", || async { Ok::<_, ()>(2) })
            .await
            .unwrap();
        assert_eq!(value, 2);
    }
}
