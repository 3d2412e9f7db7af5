//! Dependency-driven async data fetching.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use hub_cache::FetchCache;
use hub_data::FetchError;

type Producer<D, T> = Arc<dyn Fn(D) -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;
type KeyFn<D> = Arc<dyn Fn(&D) -> String + Send + Sync>;

/// Options for an [`AsyncData`] hook.
pub struct FetchOptions<D> {
    /// Run the producer as soon as the hook is created.
    pub immediate: bool,
    cache_key: Option<KeyFn<D>>,
}

impl<D> FetchOptions<D> {
    /// Fetch on creation, without caching.
    pub fn immediate() -> Self {
        Self {
            immediate: true,
            cache_key: None,
        }
    }

    /// Wait for a dependency change or an explicit refetch.
    pub fn deferred() -> Self {
        Self {
            immediate: false,
            cache_key: None,
        }
    }

    /// Cache results under a fixed key.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.cache_key = Some(Arc::new(move |_: &D| key.clone()));
        self
    }

    /// Cache results under a key derived from the dependencies.
    pub fn with_cache_key_fn<F>(mut self, key: F) -> Self
    where
        F: Fn(&D) -> String + Send + Sync + 'static,
    {
        self.cache_key = Some(Arc::new(key));
        self
    }

    /// Cache key for `deps`, if caching is enabled.
    pub fn cache_key(&self, deps: &D) -> Option<String> {
        self.cache_key.as_ref().map(|key| key(deps))
    }
}

impl<D> Default for FetchOptions<D> {
    fn default() -> Self {
        Self::immediate()
    }
}

impl<D> Clone for FetchOptions<D> {
    fn clone(&self) -> Self {
        Self {
            immediate: self.immediate,
            cache_key: self.cache_key.clone(),
        }
    }
}

impl<D> fmt::Debug for FetchOptions<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("immediate", &self.immediate)
            .field("cached", &self.cache_key.is_some())
            .finish()
    }
}

/// Snapshot of an [`AsyncData`] hook.
///
/// Previous `data` stays visible while a newer call is loading, and survives
/// a failed call.
#[derive(Debug)]
pub struct AsyncDataState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<Arc<FetchError>>,
}

impl<T> Default for AsyncDataState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T: Clone> Clone for AsyncDataState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T> AsyncDataState<T> {
    /// Whether a call has completed with neither data nor error.
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && self.error.is_none() && !self.loading
    }

    /// User-facing message of the current error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().map(FetchError::user_message)
    }
}

/// Shared between the hook and its in-flight calls.
struct Shared<T> {
    /// Generation of the most recently started call.
    generation: Mutex<u64>,
    state: watch::Sender<AsyncDataState<T>>,
}

impl<T> Shared<T> {
    fn generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fetches a value whenever its dependencies change.
///
/// Only the most recently started call may commit: results of superseded
/// calls are dropped without touching state or cache. Producer failures are
/// captured into [`AsyncDataState::error`] and never propagated.
pub struct AsyncData<T, D> {
    producer: Producer<D, T>,
    deps: D,
    options: FetchOptions<D>,
    cache: FetchCache,
    shared: Arc<Shared<T>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T, D> AsyncData<T, D>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    D: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create the hook and, if `options.immediate`, start the first call.
    ///
    /// Must be called within a tokio runtime.
    pub fn new<F, Fut>(producer: F, deps: D, options: FetchOptions<D>, cache: FetchCache) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let producer: Producer<D, T> = Arc::new(move |deps| producer(deps).boxed());
        let (state, _) = watch::channel(AsyncDataState::default());

        let hook = Self {
            producer,
            deps,
            options,
            cache,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                state,
            }),
            task: Mutex::new(None),
        };

        if hook.options.immediate {
            hook.run(true);
        }
        hook
    }

    /// Replace the dependencies. A change by value starts a new call.
    ///
    /// Returns whether a call was started.
    pub fn set_deps(&mut self, deps: D) -> bool {
        if self.deps == deps {
            return false;
        }
        self.deps = deps;
        self.run(true);
        true
    }

    /// Current dependencies.
    pub fn deps(&self) -> &D {
        &self.deps
    }

    /// Run the producer again, ignoring any cached value.
    pub fn refetch(&self) {
        self.run(false);
    }

    /// Current state.
    pub fn state(&self) -> AsyncDataState<T> {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AsyncDataState<T>> {
        self.shared.state.subscribe()
    }

    /// Wait until no call is loading and return the state.
    pub async fn settled(&self) -> AsyncDataState<T> {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|state| !state.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    fn run(&self, use_cache: bool) {
        let key = self.options.cache_key(&self.deps);
        let mut generation = self.shared.generation();
        *generation += 1;
        let current = *generation;

        if use_cache {
            if let Some(value) = key.as_deref().and_then(|key| self.cached(key)) {
                tracing::debug!(cache_key = ?key, generation = current, "cache hit");
                self.shared.state.send_modify(|state| {
                    state.data = Some(value);
                    state.error = None;
                    state.loading = false;
                });
                return;
            }
        }

        self.shared.state.send_modify(|state| state.loading = true);
        drop(generation);

        let call = (self.producer)(self.deps.clone());
        let shared = Arc::clone(&self.shared);
        let cache = self.cache.clone();
        let handle = tokio::spawn(async move {
            let result = call.await;

            let generation = shared.generation();
            if *generation != current {
                tracing::trace!(
                    generation = current,
                    latest = *generation,
                    "discarding stale response"
                );
                return;
            }

            match result {
                Ok(value) => {
                    if let Some(key) = &key {
                        if let Err(e) = cache.set(key, &value) {
                            tracing::warn!(cache_key = %key, error = %e, "failed to cache response");
                        }
                    }
                    shared.state.send_modify(|state| {
                        state.data = Some(value);
                        state.error = None;
                        state.loading = false;
                    });
                }
                Err(e) => {
                    tracing::debug!(generation = current, error = %e, "fetch failed");
                    shared.state.send_modify(|state| {
                        state.error = Some(Arc::new(e));
                        state.loading = false;
                    });
                }
            }
        });

        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn cached(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(cache_key = key, error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }
}

impl<T, D> Drop for AsyncData<T, D> {
    fn drop(&mut self) {
        *self.shared.generation() += 1;
        if let Some(task) = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

impl<T, D: fmt::Debug> fmt::Debug for AsyncData<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncData")
            .field("deps", &self.deps)
            .field("options", &self.options)
            .finish()
    }
}
