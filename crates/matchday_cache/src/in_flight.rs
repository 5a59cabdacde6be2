//! Per-key registry of outstanding fetches.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type SharedFetch<T, E> = Shared<BoxFuture<'static, Result<Option<T>, E>>>;
type Pending<T, E> = Arc<Mutex<HashMap<String, SharedFetch<T, E>>>>;

/// Lets concurrent misses for one key share a single upstream fetch.
///
/// The first caller for a key becomes the leader: its fetch future is registered
/// and awaited. Callers arriving while it is outstanding attach to the same
/// future and receive a clone of its outcome, error included. The registration
/// is removed when the leader finishes or is dropped, so the next miss starts a
/// fresh fetch.
///
/// With coalescing disabled every call simply awaits its own fetch, which
/// reproduces the plain cache-aside race where concurrent misses each hit the
/// upstream.
pub struct InFlight<T, E> {
    name: Arc<str>,
    coalesce: bool,
    pending: Pending<T, E>,
}

impl<T, E> InFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a registry that coalesces concurrent fetches.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_coalescing(name, true)
    }

    /// Create a registry, choosing whether concurrent fetches are coalesced.
    pub fn with_coalescing(name: impl Into<Arc<str>>, coalesce: bool) -> Self {
        Self {
            name: name.into(),
            coalesce,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Name used in log output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether concurrent fetches for one key are merged.
    pub fn is_coalescing(&self) -> bool {
        self.coalesce
    }

    /// Number of keys with an outstanding fetch.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Await `fetch`, or the fetch already outstanding for `key`.
    ///
    /// When another fetch is outstanding, `fetch` is dropped without being polled.
    pub async fn run<Fut>(&self, key: &str, fetch: Fut) -> Result<Option<T>, E>
    where
        Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
    {
        if !self.coalesce {
            return fetch.await;
        }

        let (shared, guard) = {
            let mut pending = self.pending.lock();
            match pending.get(key) {
                Some(outstanding) => {
                    tracing::debug!(store = %self.name, key, "Joining in-flight fetch");
                    (outstanding.clone(), None)
                }
                None => {
                    let shared = fetch.boxed().shared();
                    pending.insert(key.to_string(), shared.clone());
                    let guard = FetchGuard {
                        pending: Arc::clone(&self.pending),
                        key: key.to_string(),
                    };
                    (shared, Some(guard))
                }
            }
        };

        let outcome = shared.await;
        drop(guard);
        outcome
    }
}

impl<T, E> fmt::Debug for InFlight<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("name", &self.name)
            .field("coalesce", &self.coalesce)
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}

/// Deregisters the leader's fetch once it completes or is cancelled.
struct FetchGuard<T, E> {
    pending: Pending<T, E>,
    key: String,
}

impl<T, E> Drop for FetchGuard<T, E> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.key);
    }
}
