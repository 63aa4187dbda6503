//! Read-Through Module
//!
//! Puts a shared cache in front of a remote point read. The caller picks the
//! key and supplies the fetch; the cache only decides whether to call it.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::CacheStore;

/// A cache store shared between the composition root, handlers and the
/// sweep task.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a store so it can be shared across tasks.
pub fn shared<V: Clone>(store: CacheStore<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(store))
}

// == Cache Key ==
/// Builds a cache key as `{collection}_{discriminator}`.
pub fn cache_key(collection: &str, discriminator: impl Display) -> String {
    format!("{}_{}", collection, discriminator)
}

// == Read Through ==
/// Returns the cached value for `key`, or awaits `fetch` and caches its
/// result.
///
/// The lock is released while `fetch` runs. A failed fetch stores nothing
/// and its error is returned unchanged.
///
/// # Arguments
/// * `cache` - Shared store to consult
/// * `key` - Cache key chosen by the caller
/// * `ttl` - Lifetime of a freshly fetched value (None = store default)
/// * `fetch` - Remote read to run on a miss
pub async fn read_through<V, E, F, Fut>(
    cache: &SharedCache<V>,
    key: &str,
    ttl: Option<Duration>,
    fetch: F,
) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(value) = cache.write().await.get(key) {
        debug!(key, "read-through hit");
        return Ok(value);
    }

    debug!(key, "read-through miss, fetching");
    let value = fetch().await?;
    cache.write().await.set(key, value.clone(), ttl);
    Ok(value)
}

/// Like [`read_through`], but a failed fetch is logged and turned into
/// `V::default()` (an empty list, for query results).
pub async fn read_through_or_default<V, E, F, Fut>(
    cache: &SharedCache<V>,
    key: &str,
    ttl: Option<Duration>,
    fetch: F,
) -> V
where
    V: Clone + Default,
    E: Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    match read_through(cache, key, ttl, fetch).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "fetch failed, using empty result");
            V::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> SharedCache<Vec<String>> {
        shared(CacheStore::new(Duration::from_secs(300)))
    }

    #[test]
    fn test_cache_key_convention() {
        assert_eq!(cache_key("services", "cat1"), "services_cat1");
        assert_eq!(cache_key("orders", 42), "orders_42");
    }

    #[test]
    fn test_read_through_fetches_once() {
        let cache = cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..3 {
            let value: Result<_, String> = tokio_test::block_on(read_through(
                &cache,
                "services_cat1",
                None,
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["Fan Fitting".to_string()])
                },
            ));
            assert_eq!(value.unwrap(), vec!["Fan Fitting".to_string()]);
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_read_through_error_is_not_cached() {
        let cache = cache();

        let first: Result<Vec<String>, String> =
            tokio_test::block_on(read_through(&cache, "k", None, || async {
                Err("offline".to_string())
            }));
        assert_eq!(first.unwrap_err(), "offline");
        assert!(tokio_test::block_on(cache.write()).is_empty());

        let second: Result<Vec<String>, String> =
            tokio_test::block_on(read_through(&cache, "k", None, || async {
                Ok(vec!["x".to_string()])
            }));
        assert_eq!(second.unwrap(), vec!["x".to_string()]);
    }

    #[test]
    fn test_read_through_or_default_on_error() {
        let cache = cache();

        let value = tokio_test::block_on(read_through_or_default(&cache, "k", None, || async {
            Err::<Vec<String>, _>("permission denied")
        }));

        assert!(value.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_through_refetches_after_expiry() {
        let cache = cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let ttl = Some(Duration::from_secs(5));

        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec!["v".to_string()])
        };

        read_through(&cache, "k", ttl, fetch).await.unwrap();
        read_through(&cache, "k", ttl, fetch).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(6)).await;

        read_through(&cache, "k", ttl, fetch).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
