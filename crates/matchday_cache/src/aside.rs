//! Cache-aside orchestration.

use crate::{InFlight, Populated};
use std::fmt::Display;
use std::future::Future;

/// Return the cached value if it is populated, otherwise fetch, store and return.
///
/// `read` looks `key` up in the caller's cache. On a miss, `fetch` is invoked
/// (or an outstanding fetch for the same key is joined, see [`InFlight`]). A
/// caller that becomes the fetch leader reads the cache once more before
/// fetching, since another leader may have stored the value between the first
/// read and the registration. A populated result is handed to `save` before being returned;
/// an empty or absent result is returned as `None` and never stored, so the next
/// call tries the upstream again. Errors from `fetch` are returned unchanged and
/// leave the cache untouched.
///
/// # Example
///
/// ```
/// use matchday_cache::{cache_aside, ExpiringStore, InFlight};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store: ExpiringStore<Vec<String>> = ExpiringStore::new("competitions", Duration::from_secs(60));
/// let in_flight: InFlight<Vec<String>, String> = InFlight::new("competitions");
///
/// let reader = store.clone();
/// let writer = store.clone();
/// let result = cache_aside(
///     move || reader.get("all"),
///     &in_flight,
///     "all",
///     || async { Ok(Some(vec!["Premier League".to_string()])) },
///     move |value| writer.put("all", value),
/// )
/// .await;
///
/// assert_eq!(result, Ok(Some(vec!["Premier League".to_string()])));
/// assert!(store.get("all").is_some());
/// # }
/// ```
#[tracing::instrument(skip_all, fields(store = %in_flight.name(), key = %key))]
pub async fn cache_aside<T, E, R, F, Fut, S>(
    read: R,
    in_flight: &InFlight<T, E>,
    key: &str,
    fetch: F,
    save: S,
) -> Result<Option<T>, E>
where
    T: Populated + Clone + Send + Sync + 'static,
    E: Display + Clone + Send + Sync + 'static,
    R: Fn() -> Option<T> + Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
    S: FnOnce(T) + Send + 'static,
{
    if let Some(hit) = read().filter(|value| value.is_populated()) {
        tracing::debug!("Cache hit");
        return Ok(Some(hit));
    }

    tracing::debug!("Cache miss, fetching from upstream");
    let load = async move {
        if let Some(hit) = read().filter(|value| value.is_populated()) {
            tracing::debug!("Filled by a fetch that just finished");
            return Ok(Some(hit));
        }

        match fetch().await {
            Ok(Some(value)) if value.is_populated() => {
                save(value.clone());
                Ok(Some(value))
            }
            Ok(_) => {
                tracing::debug!("Upstream returned nothing, leaving cache empty");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Upstream fetch failed");
                Err(e)
            }
        }
    };

    in_flight.run(key, load).await
}
