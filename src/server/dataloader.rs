use std::collections::HashMap;
use std::fmt::Debug;
use std::future::poll_fn;
use std::hash::Hash;
use std::pin::{Pin, pin};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Poll, Waker};

use tracing::debug;

/// Resolves a whole batch of keys at once.
///
/// The returned map must hold an entry for every key that was passed in,
/// otherwise the resolvers waiting on a missing key never wake up.
pub trait BatchLoader {
    type K: Hash + Eq + Clone + Debug + Send;
    type V: Clone + Send;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static;
}

enum Entry<V> {
    Requested(Vec<Waker>),
    Ready(V),
}

struct LoaderInner<B: BatchLoader> {
    values: HashMap<B::K, Entry<B::V>>,
    pending_keys: HashMap<B::K, Vec<Waker>>,
    load_batch: B,
}

type BatchFuture<B> =
    Pin<Box<dyn Future<Output = HashMap<<B as BatchLoader>::K, <B as BatchLoader>::V>> + Send>>;

/// Collects the keys requested while a request executes and resolves them
/// with a single [`BatchLoader::load_batch`] call per round.
///
/// Values are cached for the lifetime of the loader, which is one request.
pub struct DataLoader<B: BatchLoader> {
    inner: Arc<Mutex<LoaderInner<B>>>,
}

impl<B: BatchLoader> Clone for DataLoader<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B: BatchLoader> DataLoader<B> {
    pub fn new(load_batch: B) -> Self {
        let inner = LoaderInner {
            load_batch,
            values: Default::default(),
            pending_keys: Default::default(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderInner<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves once the batch containing `key` has been loaded.
    ///
    /// Only makes progress while the surrounding future is driven by [`DataLoader::wrap`].
    pub fn load(&self, key: B::K) -> impl Future<Output = B::V> {
        poll_fn(move |cx| {
            let mut inner = self.lock();

            let wakers = match inner.values.get_mut(&key) {
                Some(Entry::Ready(v)) => {
                    return Poll::Ready(v.clone());
                }
                Some(Entry::Requested(wakers)) => wakers,
                None => inner.pending_keys.entry(key.clone()).or_insert_with(|| {
                    debug!(?key, "queueing key for the next batch");
                    vec![]
                }),
            };

            wakers.push(cx.waker().clone());
            Poll::Pending
        })
    }

    /// Drops every cached value so later loads observe fresh data.
    ///
    /// Keys that are currently being loaded are kept.
    pub fn clear(&self) {
        self.lock()
            .values
            .retain(|_, entry| matches!(entry, Entry::Requested(_)));
    }

    /// Stores a finished batch and wakes every resolver waiting on one of its keys.
    fn complete_batch(&self, values: HashMap<B::K, B::V>) {
        let mut inner = self.lock();
        for (key, value) in values {
            if let Some(Entry::Requested(wakers)) = inner.values.insert(key, Entry::Ready(value)) {
                wakers.into_iter().for_each(Waker::wake);
            }
        }
    }

    /// Moves the queued keys to in-flight and starts loading them, if any are queued.
    fn start_batch(&self) -> Option<BatchFuture<B>> {
        let mut inner = self.lock();
        if inner.pending_keys.is_empty() {
            return None;
        }

        let queued = std::mem::take(&mut inner.pending_keys);
        let mut keys = Vec::with_capacity(queued.len());
        for (key, wakers) in queued {
            keys.push(key.clone());
            inner.values.insert(key, Entry::Requested(wakers));
        }

        debug!(?keys, "dispatching batch");
        Some(Box::pin(inner.load_batch.load_batch(keys)))
    }

    /// Drives `fut`, dispatching a batch whenever it stalls on keys requested through [`DataLoader::load`].
    ///
    /// At most one batch is in flight at a time.
    pub async fn wrap<O>(&self, fut: impl Future<Output = O>) -> O {
        let mut in_flight: Option<BatchFuture<B>> = None;

        let mut fut = pin!(fut);
        poll_fn(move |cx| {
            if let Some(batch) = &mut in_flight {
                let Poll::Ready(values) = batch.as_mut().poll(cx) else {
                    return Poll::Pending;
                };
                self.complete_batch(values);
                in_flight = None;
            }

            let res = fut.as_mut().poll(cx);
            if res.is_pending() {
                in_flight = self.start_batch();
                if in_flight.is_some() {
                    // The new batch has not been polled yet.
                    cx.waker().wake_by_ref();
                }
            }
            res
        })
        .await
    }
}
