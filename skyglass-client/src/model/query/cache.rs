use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use skyglass_common::Dataset;

use super::key::QueryKey;
use super::policy::QueryPolicy;
use crate::error::ApiError;

type CachedValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<CachedValue, ApiError>>>;

/// Observable state of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing cached and nothing in flight
    Idle,
    Pending,
    Fresh,
    Stale,
}

struct InFlight {
    generation: u64,
    token: CancellationToken,
    future: SharedFetch,
}

#[derive(Default)]
struct Entry {
    /// Replaced whenever a request is started or abandoned; only the request
    /// holding the current generation may write `data`. Start generations come
    /// from a cache-wide counter so a re-created entry never reuses one.
    generation: u64,
    data: Option<(CachedValue, Instant)>,
    in_flight: Option<InFlight>,
}

impl Entry {
    fn abandon_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.token.cancel();
                self.generation += 1;
                true
            }
            None => false,
        }
    }

    /// Nothing in flight and no result younger than `gc_time`
    fn is_collectable(&self, gc_time: Duration) -> bool {
        self.in_flight.is_none()
            && self
                .data
                .as_ref()
                .map_or(true, |(_, fetched_at)| fetched_at.elapsed() >= gc_time)
    }
}

type Entries = Arc<Mutex<HashMap<QueryKey, Entry>>>;

fn lock(entries: &Entries) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory query cache shared by every view.
///
/// The map is guarded by a plain mutex that is never held across an `.await`.
/// Each request runs on its own task with a child of the cache's root token,
/// so `shutdown` (or dropping the cache) cancels everything still in flight.
///
/// Idle entries older than the collection window are evicted whenever a new
/// request is started.
pub struct QueryCache {
    entries: Entries,
    root: CancellationToken,
    default_policy: QueryPolicy,
    gc_time: Duration,
    next_generation: AtomicU64,
}

enum Plan {
    Hit(CachedValue),
    Join(SharedFetch),
    Start,
}

impl QueryCache {
    pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);

    pub fn new(default_policy: QueryPolicy) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            root: CancellationToken::new(),
            default_policy,
            gc_time: Self::DEFAULT_GC_TIME,
            next_generation: AtomicU64::new(1),
        }
    }

    /// Should not be shorter than the longest stale time in use, or fresh
    /// results get evicted early.
    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    pub fn gc_time(&self) -> Duration {
        self.gc_time
    }

    pub fn default_policy(&self) -> &QueryPolicy {
        &self.default_policy
    }

    /// Fetch under the default policy
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let policy = self.default_policy;
        self.fetch_with(key, &policy, fetcher).await
    }

    /// Serve a fresh cached value, join the in-flight request for the same key,
    /// or start a new one.
    pub async fn fetch_with<T, F, Fut>(
        &self,
        key: QueryKey,
        policy: &QueryPolicy,
        fetcher: F,
    ) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let future = {
            let mut entries = lock(&self.entries);
            match Self::plan(&entries, &key, policy) {
                Plan::Hit(value) => {
                    debug!("Query {} served from cache", key);
                    return downcast(&key, value);
                }
                Plan::Join(future) => {
                    debug!("Query {} joined in-flight request", key);
                    future
                }
                Plan::Start => self.start(&mut entries, &key, policy, fetcher),
            }
        };

        downcast(&key, future.await?)
    }

    /// Start a new request for `key`, superseding any request still in flight.
    ///
    /// Used for user-initiated searches. The superseded request is cancelled and
    /// its waiters observe `ApiError::Canceled`; its result never reaches the cache.
    pub async fn refetch<T, F, Fut>(
        &self,
        key: QueryKey,
        policy: &QueryPolicy,
        fetcher: F,
    ) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let future = {
            let mut entries = lock(&self.entries);
            if let Some(entry) = entries.get_mut(&key) {
                if entry.abandon_in_flight() {
                    debug!("Query {} superseded by a newer request", key);
                }
            }
            self.start(&mut entries, &key, policy, fetcher)
        };

        downcast(&key, future.await?)
    }

    fn plan(entries: &HashMap<QueryKey, Entry>, key: &QueryKey, policy: &QueryPolicy) -> Plan {
        let Some(entry) = entries.get(key) else {
            return Plan::Start;
        };

        if let Some((value, fetched_at)) = &entry.data {
            if fetched_at.elapsed() < policy.stale_time {
                return Plan::Hit(value.clone());
            }
        }

        match &entry.in_flight {
            Some(in_flight) => Plan::Join(in_flight.future.clone()),
            None => Plan::Start,
        }
    }

    fn start<T, F, Fut>(
        &self,
        entries: &mut HashMap<QueryKey, Entry>,
        key: &QueryKey,
        policy: &QueryPolicy,
        fetcher: F,
    ) -> SharedFetch
    where
        T: Send + Sync + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.collect_garbage(entries, key);

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = entries.entry(key.clone()).or_default();
        entry.generation = generation;
        let token = self.root.child_token();

        let task_entries = Arc::clone(&self.entries);
        let task_key = key.clone();
        let task_token = token.clone();
        let policy = *policy;

        let handle = tokio::spawn(async move {
            let result = run_with_retry(&task_key, &policy, &task_token, fetcher)
                .await
                .map(|value| Arc::new(value) as CachedValue);
            let result = if task_token.is_cancelled() {
                Err(ApiError::Canceled)
            } else {
                result
            };
            complete(&task_entries, &task_key, generation, &result);
            result
        });

        let future = async move {
            match handle.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Err(ApiError::Canceled),
                Err(e) => Err(ApiError::Transport(format!("query task failed: {}", e))),
            }
        }
        .boxed()
        .shared();

        entry.in_flight = Some(InFlight {
            generation,
            token,
            future: future.clone(),
        });

        future
    }

    fn collect_garbage(&self, entries: &mut HashMap<QueryKey, Entry>, keep: &QueryKey) {
        let before = entries.len();
        entries.retain(|key, entry| key == keep || !entry.is_collectable(self.gc_time));
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!("Evicted {} idle cache entries", evicted);
        }
    }

    /// Number of keys currently tracked, cached or in flight
    pub fn entry_count(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Cancel the in-flight request for `key`, if any
    pub fn cancel(&self, key: &QueryKey) -> bool {
        let mut entries = lock(&self.entries);
        let cancelled = entries
            .get_mut(key)
            .is_some_and(Entry::abandon_in_flight);
        if cancelled {
            debug!("Query {} canceled", key);
        }
        cancelled
    }

    /// Cancel every in-flight request of a dataset, e.g. when its view is left
    pub fn cancel_dataset(&self, dataset: Dataset) -> usize {
        let mut entries = lock(&self.entries);
        let count = entries
            .iter_mut()
            .filter(|(key, _)| key.dataset() == dataset)
            .filter(|(_, entry)| entry.in_flight.is_some())
            .map(|(_, entry)| entry.abandon_in_flight())
            .count();
        if count > 0 {
            debug!("Canceled {} in-flight {} queries", count, dataset);
        }
        count
    }

    /// Drop the cached value so the next fetch goes to the network
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = lock(&self.entries).get_mut(key) {
            entry.data = None;
        }
    }

    pub fn status(&self, key: &QueryKey, policy: &QueryPolicy) -> QueryStatus {
        let entries = lock(&self.entries);
        match entries.get(key) {
            None => QueryStatus::Idle,
            Some(entry) if entry.in_flight.is_some() => QueryStatus::Pending,
            Some(entry) => match &entry.data {
                Some((_, at)) if at.elapsed() < policy.stale_time => QueryStatus::Fresh,
                Some(_) => QueryStatus::Stale,
                None => QueryStatus::Idle,
            },
        }
    }

    /// Last successful value for `key`, fresh or not
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = lock(&self.entries);
        let (value, _) = entries.get(key)?.data.as_ref()?;
        value.clone().downcast::<T>().ok()
    }

    pub fn in_flight_count(&self) -> usize {
        lock(&self.entries)
            .values()
            .filter(|e| e.in_flight.is_some())
            .count()
    }

    /// Cancel everything in flight; later fetches resolve to `Canceled`
    pub fn shutdown(&self) {
        self.root.cancel();
        let mut entries = lock(&self.entries);
        for entry in entries.values_mut() {
            entry.abandon_in_flight();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryPolicy::global())
    }
}

impl Drop for QueryCache {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: CachedValue) -> Result<Arc<T>, ApiError> {
    value
        .downcast::<T>()
        .map_err(|_| ApiError::Invalid(format!("cached value for {} has an unexpected type", key)))
}

fn complete(entries: &Entries, key: &QueryKey, generation: u64, result: &Result<CachedValue, ApiError>) {
    let mut entries = lock(entries);
    let Some(entry) = entries.get_mut(key) else {
        return;
    };

    if entry.generation != generation {
        debug!("Discarding superseded result for {}", key);
        return;
    }

    if entry
        .in_flight
        .as_ref()
        .is_some_and(|f| f.generation == generation)
    {
        entry.in_flight = None;
    }

    if let Ok(value) = result {
        entry.data = Some((value.clone(), Instant::now()));
    }
}

async fn run_with_retry<T, F, Fut>(
    key: &QueryKey,
    policy: &QueryPolicy,
    token: &CancellationToken,
    fetcher: F,
) -> Result<T, ApiError>
where
    F: Fn(CancellationToken) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut failures = 0;

    loop {
        let error = match fetcher(token.clone()).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if error.is_canceled() || token.is_cancelled() {
            return Err(ApiError::Canceled);
        }

        if !policy.should_retry(failures, &error) {
            if failures > 0 {
                warn!("Query {} failed after {} retries: {}", key, failures, error);
            }
            return Err(error);
        }

        let delay = policy.retry_delay(failures);
        failures += 1;
        warn!(
            "Query {} failed: {} (retry {}/{} in {:?})",
            key, error, failures, policy.max_retries, delay
        );

        tokio::select! {
            _ = token.cancelled() => return Err(ApiError::Canceled),
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(name: &str) -> QueryKey {
        QueryKey::new(Dataset::Apod).with(name)
    }

    fn counting_fetcher(
        calls: Arc<AtomicUsize>,
        value: u32,
    ) -> impl Fn(CancellationToken) -> BoxFuture<'static, Result<u32, ApiError>> + Send + Sync + 'static
    {
        move |_token| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(value) }.boxed()
        }
    }

    fn failing_fetcher(
        calls: Arc<AtomicUsize>,
        status: u16,
    ) -> impl Fn(CancellationToken) -> BoxFuture<'static, Result<u32, ApiError>> + Send + Sync + 'static
    {
        move |_token| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(ApiError::Http(HttpError::new(status, None))) }.boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_value_is_served_without_fetch() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = QueryPolicy::dataset();

        let a = cache.fetch_with(key("k"), &policy, counting_fetcher(calls.clone(), 7)).await.unwrap();
        let b = cache.fetch_with(key("k"), &policy, counting_fetcher(calls.clone(), 8)).await.unwrap();

        assert_eq!((*a, *b), (7, 7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.status(&key("k"), &policy), QueryStatus::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_value_is_refetched() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = QueryPolicy::dataset();

        cache.fetch_with(key("k"), &policy, counting_fetcher(calls.clone(), 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.status(&key("k"), &policy), QueryStatus::Stale);

        let v = cache.fetch_with(key("k"), &policy, counting_fetcher(calls.clone(), 2)).await.unwrap();
        assert_eq!(*v, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = QueryPolicy::dataset();

        let slow = {
            let calls = calls.clone();
            move |_token: CancellationToken| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    Ok::<_, ApiError>(5u32)
                }
            }
        };

        let (a, b) = tokio::join!(
            cache.fetch_with(key("k"), &policy, slow.clone()),
            cache.fetch_with(key("k"), &policy, slow),
        );

        assert_eq!((*a.unwrap(), *b.unwrap()), (5, 5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_is_retried_twice_then_surfaces() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let err = cache
            .fetch_with(key("k"), &QueryPolicy::dataset(), failing_fetcher(calls.clone(), 500))
            .await
            .unwrap_err();

        assert_eq!(err.status(), 500);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_is_never_retried() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let err = cache
            .fetch_with(key("k"), &QueryPolicy::dataset(), failing_fetcher(calls.clone(), 404))
            .await
            .unwrap_err();

        assert_eq!(err.status(), 404);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_too_many_requests_is_retried() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = {
            let calls = calls.clone();
            move |_token: CancellationToken| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(ApiError::Http(HttpError::new(429, None)))
                    } else {
                        Ok(9u32)
                    }
                }
            }
        };

        let v = cache.fetch_with(key("k"), &QueryPolicy::dataset(), fetcher).await.unwrap();
        assert_eq!(*v, 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_not_cached() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = QueryPolicy::dataset();

        let _ = cache.fetch_with(key("k"), &policy, failing_fetcher(calls.clone(), 400)).await;
        assert_eq!(cache.status(&key("k"), &policy), QueryStatus::Idle);

        let v = cache.fetch_with(key("k"), &policy, counting_fetcher(calls.clone(), 3)).await.unwrap();
        assert_eq!(*v, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_supersedes_in_flight_request() {
        let cache = Arc::new(QueryCache::default());
        let policy = QueryPolicy::dataset();

        let slow_a = |token: CancellationToken| async move {
            tokio::select! {
                _ = token.cancelled() => Err(ApiError::Canceled),
                _ = tokio::time::sleep(Duration::from_secs(5)) => Ok::<_, ApiError>("a"),
            }
        };
        let fast_b = |_token: CancellationToken| async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, ApiError>("b")
        };

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.fetch_with(key("k"), &policy, slow_a).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.status(&key("k"), &policy), QueryStatus::Pending);

        let second = cache.refetch(key("k"), &policy, fast_b).await.unwrap();
        assert_eq!(*second, "b");

        let first = first.await.unwrap();
        assert!(first.unwrap_err().is_canceled());

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(*cache.peek::<&str>(&key("k")).unwrap(), "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_result_never_overwrites_newer_one() {
        let cache = Arc::new(QueryCache::default());
        let policy = QueryPolicy::dataset();

        // Ignores its token and resolves late anyway.
        let stubborn = |_token: CancellationToken| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ApiError>(1u32)
        };
        let newer = |_token: CancellationToken| async move { Ok::<_, ApiError>(2u32) };

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.fetch_with(key("k"), &policy, stubborn).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.refetch(key("k"), &policy, newer).await.unwrap();

        assert!(first.await.unwrap().is_err());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(*cache.peek::<u32>(&key("k")).unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_dataset_only_touches_that_dataset() {
        let cache = Arc::new(QueryCache::default());
        let policy = QueryPolicy::dataset();
        let pending = |token: CancellationToken| async move {
            token.cancelled().await;
            Err::<u32, _>(ApiError::Canceled)
        };

        let apod = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.fetch_with(key("a"), &policy, pending).await })
        };
        let mars_key = QueryKey::new(Dataset::Mars).with("m");
        let mars = {
            let cache = cache.clone();
            let mars_key = mars_key.clone();
            tokio::spawn(async move { cache.fetch_with(mars_key, &policy, pending).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.in_flight_count(), 2);

        assert_eq!(cache.cancel_dataset(Dataset::Apod), 1);
        assert!(apod.await.unwrap().unwrap_err().is_canceled());
        assert_eq!(cache.in_flight_count(), 1);

        assert!(cache.cancel(&mars_key));
        assert!(mars.await.unwrap().unwrap_err().is_canceled());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_later_fetches() {
        let cache = QueryCache::default();
        cache.shutdown();
        assert!(cache.is_shut_down());

        let err = cache
            .fetch(key("k"), |token: CancellationToken| async move {
                if token.is_cancelled() {
                    Err(ApiError::Canceled)
                } else {
                    Ok(1u32)
                }
            })
            .await
            .unwrap_err();
        assert!(err.is_canceled());
    }

    #[tokio::test]
    async fn test_invalidate_forces_network() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key("k"), counting_fetcher(calls.clone(), 1)).await.unwrap();
        cache.invalidate(&key("k"));
        cache.fetch(key("k"), counting_fetcher(calls.clone(), 2)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_entries_are_evicted_after_gc_window() {
        let cache = QueryCache::default().with_gc_time(Duration::from_secs(120));
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = QueryPolicy::dataset();

        cache.fetch_with(key("old"), &policy, counting_fetcher(calls.clone(), 1)).await.unwrap();
        let _ = cache.fetch_with(key("failed"), &policy, failing_fetcher(calls.clone(), 404)).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        cache.fetch_with(key("young"), &policy, counting_fetcher(calls.clone(), 2)).await.unwrap();
        assert_eq!(cache.entry_count(), 2);
        assert!(cache.peek::<u32>(&key("old")).is_some());

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.fetch_with(key("new"), &policy, counting_fetcher(calls.clone(), 3)).await.unwrap();

        assert!(cache.peek::<u32>(&key("old")).is_none());
        assert_eq!(cache.status(&key("old"), &policy), QueryStatus::Idle);
        assert_eq!(*cache.peek::<u32>(&key("young")).unwrap(), 2);
        assert_eq!(cache.entry_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_entries_survive_collection() {
        let cache = Arc::new(QueryCache::default().with_gc_time(Duration::ZERO));
        let policy = QueryPolicy::dataset();
        let slow = |_token: CancellationToken| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ApiError>(4u32)
        };

        let pending = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.fetch_with(key("slow"), &policy, slow).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        cache.fetch_with(key("other"), &policy, |_token: CancellationToken| async move {
            Ok::<_, ApiError>(1u32)
        })
        .await
        .unwrap();
        assert_eq!(cache.status(&key("slow"), &policy), QueryStatus::Pending);

        assert_eq!(*pending.await.unwrap().unwrap(), 4);
        assert_eq!(*cache.peek::<u32>(&key("slow")).unwrap(), 4);
    }
}
