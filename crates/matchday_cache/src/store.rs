//! Expiring key-value store.

use crate::ExpiringStoreConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Cached value together with the moment and revision of its write.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<T> {
    value: T,
    written_at: Instant,
    revision: u64,
}

impl<T> CacheEntry<T> {
    fn new(value: T, revision: u64) -> Self {
        Self {
            value,
            written_at: Instant::now(),
            revision,
        }
    }

    /// Whether the entry is still inside `validity`.
    ///
    /// An entry read at exactly `validity` after being written is still valid.
    pub(crate) fn is_valid(&self, validity: Duration) -> bool {
        self.written_at.elapsed() <= validity
    }
}

type Entries<T> = HashMap<String, CacheEntry<T>>;

/// String-keyed store whose entries are valid for a fixed duration.
///
/// Expired entries are not swept on a schedule: a read that finds one removes it
/// and reports a miss. Writes always overwrite, whether or not the previous entry
/// has expired. When a capacity is configured, writing a new key into a full
/// store first drops expired entries and then the oldest write.
///
/// Clones share the same entries, so a clone can be moved into a fetch future
/// and write back into the store the caller reads from. The lock is only held
/// for the duration of a single synchronous operation.
///
/// Every write is stamped with a store-wide revision. A caller that reads
/// [`revision`](Self::revision) before a slow fetch can write the result with
/// [`put_unless_newer`](Self::put_unless_newer), which leaves a newer write in
/// place instead of overwriting it with the fetched snapshot.
///
/// Time is read from [`tokio::time::Instant`], so tests can pause and advance the
/// clock.
///
/// # Example
///
/// ```
/// use matchday_cache::ExpiringStore;
/// use std::time::Duration;
///
/// let store = ExpiringStore::new("chat_preferences", Duration::from_secs(30 * 60));
/// store.put("100", true);
/// assert_eq!(store.get("100"), Some(true));
/// assert_eq!(store.get("200"), None);
/// ```
pub struct ExpiringStore<T> {
    name: Arc<str>,
    validity: Duration,
    max_entries: Option<usize>,
    entries: Arc<Mutex<Entries<T>>>,
    revision: Arc<AtomicU64>,
}

impl<T: Clone> ExpiringStore<T> {
    /// Create an unbounded store.
    pub fn new(name: impl Into<Arc<str>>, validity: Duration) -> Self {
        let name = name.into();
        tracing::debug!(store = %name, ?validity, "Creating new ExpiringStore");
        Self {
            name,
            validity,
            max_entries: None,
            entries: Arc::new(Mutex::new(HashMap::new())),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a store from its configuration section.
    pub fn from_config(name: impl Into<Arc<str>>, config: &ExpiringStoreConfig) -> Self {
        let store = Self::new(name, config.validity());
        match config.max_entries() {
            Some(max) => store.with_max_entries(*max),
            None => store,
        }
    }

    /// Bound the number of stored entries. A capacity of zero behaves as one.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Name used in log output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validity applied to every entry of this store.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Look up a valid entry.
    ///
    /// An expired entry is removed and reported as absent.
    #[tracing::instrument(skip(self), fields(store = %self.name))]
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if !entry.is_valid(self.validity) {
            tracing::debug!("Cache entry expired, removing");
            entries.remove(key);
            return None;
        }

        tracing::debug!(age = ?entry.written_at.elapsed(), "Cache hit");
        Some(entry.value.clone())
    }

    /// Store `value` under `key` with the current time, replacing any prior entry.
    #[tracing::instrument(skip(self, key, value), fields(store = %self.name))]
    pub fn put(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let mut entries = self.entries.lock();
        self.insert(&mut entries, key, value);
    }

    /// Revision of the latest write to this store.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Store `value` unless `key` was written after `since` was read from
    /// [`revision`](Self::revision).
    ///
    /// Returns whether the value was stored.
    #[tracing::instrument(skip(self, key, value), fields(store = %self.name))]
    pub fn put_unless_newer(&self, key: impl Into<String>, value: T, since: u64) -> bool {
        let key = key.into();
        let mut entries = self.entries.lock();

        if let Some(existing) = entries.get(&key)
            && existing.revision > since
        {
            tracing::debug!(key = %key, since, current = existing.revision, "Newer write in place, skipping");
            return false;
        }

        self.insert(&mut entries, key, value);
        true
    }

    fn insert(&self, entries: &mut Entries<T>, key: String, value: T) {
        if let Some(max) = self.max_entries
            && !entries.contains_key(&key)
            && entries.len() >= max
        {
            make_room(&self.name, entries, self.validity, max);
        }

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(key = %key, revision, replaced = entries.contains_key(&key), "Stored cache entry");
        entries.insert(key, CacheEntry::new(value, revision));
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        purge(&self.name, &mut self.entries.lock(), self.validity)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T: Clone + Send + 'static> ExpiringStore<T> {
    /// Sweep expired entries every `every` on the current tokio runtime.
    ///
    /// The task stops on its own once every clone of the store has been dropped;
    /// abort the returned handle to stop it earlier.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        let name = Arc::clone(&self.name);
        let validity = self.validity;
        let entries: Weak<Mutex<Entries<T>>> = Arc::downgrade(&self.entries);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(live) = entries.upgrade() else {
                    tracing::debug!(store = %name, "Store dropped, stopping purge task");
                    break;
                };
                purge(&name, &mut live.lock(), validity);
            }
        })
    }
}

impl<T> Clone for ExpiringStore<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            validity: self.validity,
            max_entries: self.max_entries,
            entries: Arc::clone(&self.entries),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<T> fmt::Debug for ExpiringStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("name", &self.name)
            .field("validity", &self.validity)
            .field("max_entries", &self.max_entries)
            .field("len", &self.entries.lock().len())
            .field("revision", &self.revision.load(Ordering::SeqCst))
            .finish()
    }
}

fn purge<T>(name: &str, entries: &mut Entries<T>, validity: Duration) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.is_valid(validity));

    let removed = before - entries.len();
    if removed > 0 {
        tracing::info!(store = name, removed, remaining = entries.len(), "Purged expired cache entries");
    }
    removed
}

/// Free a slot for a new key: expired entries first, then the oldest write.
fn make_room<T>(name: &str, entries: &mut Entries<T>, validity: Duration, max: usize) {
    purge(name, entries, validity);

    while entries.len() >= max {
        let Some(oldest) = entries
            .iter()
            .min_by_key(|(_, entry)| entry.written_at)
            .map(|(key, _)| key.clone())
        else {
            break;
        };
        tracing::debug!(store = name, key = %oldest, "Evicting oldest cache entry");
        entries.remove(&oldest);
    }
}
