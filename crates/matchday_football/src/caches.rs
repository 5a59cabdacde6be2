//! One cache wrapper per entity kind.
//!
//! Wrappers turn a domain identifier into a store key and narrow the generic
//! store to typed accessors. They add no logic of their own: no merging, no
//! partial updates.

use crate::{ChatId, ChatPreferences, Competition, CompetitionMatches, CompetitionTable, MatchSummary};
use matchday_cache::{ExpiringStore, ExpiringStoreConfig};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Key under which the single competition catalogue is stored.
pub const COMPETITIONS_KEY: &str = "competitions";

/// Cache for the competition catalogue.
#[derive(Debug, Clone)]
pub struct CompetitionsCache {
    store: ExpiringStore<Vec<Competition>>,
}

impl CompetitionsCache {
    /// Create the cache from its configuration section.
    pub fn new(config: &ExpiringStoreConfig) -> Self {
        Self {
            store: ExpiringStore::from_config("competitions", config),
        }
    }

    /// Cached catalogue.
    pub fn get(&self) -> Option<Vec<Competition>> {
        self.store.get(COMPETITIONS_KEY)
    }

    /// Replace the cached catalogue.
    pub fn save(&self, competitions: Vec<Competition>) {
        self.store.put(COMPETITIONS_KEY, competitions);
    }

    /// Sweep expired entries periodically.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        self.store.spawn_purge_task(every)
    }
}

/// Cache for the matches of each competition, keyed by competition id.
#[derive(Debug, Clone)]
pub struct MatchesCache {
    store: ExpiringStore<CompetitionMatches>,
}

impl MatchesCache {
    /// Create the cache from its configuration section.
    pub fn new(config: &ExpiringStoreConfig) -> Self {
        Self {
            store: ExpiringStore::from_config("matches", config),
        }
    }

    pub(crate) fn key(competition_id: u64) -> String {
        competition_id.to_string()
    }

    /// Cached matches of a competition.
    pub fn get(&self, competition_id: u64) -> Option<CompetitionMatches> {
        self.store.get(&Self::key(competition_id))
    }

    /// Store the matches of a competition.
    pub fn save(&self, competition_id: u64, matches: CompetitionMatches) {
        self.store.put(Self::key(competition_id), matches);
    }

    /// Sweep expired entries periodically.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        self.store.spawn_purge_task(every)
    }
}

/// Cache for league tables, keyed by competition id.
#[derive(Debug, Clone)]
pub struct TableCache {
    store: ExpiringStore<CompetitionTable>,
}

impl TableCache {
    /// Create the cache from its configuration section.
    pub fn new(config: &ExpiringStoreConfig) -> Self {
        Self {
            store: ExpiringStore::from_config("tables", config),
        }
    }

    pub(crate) fn key(competition_id: u64) -> String {
        competition_id.to_string()
    }

    /// Cached table of a competition.
    pub fn get(&self, competition_id: u64) -> Option<CompetitionTable> {
        self.store.get(&Self::key(competition_id))
    }

    /// Store the table of a competition.
    pub fn save(&self, competition_id: u64, table: CompetitionTable) {
        self.store.put(Self::key(competition_id), table);
    }

    /// Sweep expired entries periodically.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        self.store.spawn_purge_task(every)
    }
}

/// Cache for per-day match summaries, keyed by the date string as given.
#[derive(Debug, Clone)]
pub struct MatchSummaryCache {
    store: ExpiringStore<Vec<MatchSummary>>,
}

impl MatchSummaryCache {
    /// Create the cache from its configuration section.
    pub fn new(config: &ExpiringStoreConfig) -> Self {
        Self {
            store: ExpiringStore::from_config("match_summaries", config),
        }
    }

    /// Cached summaries for `date`.
    pub fn get(&self, date: &str) -> Option<Vec<MatchSummary>> {
        self.store.get(date)
    }

    /// Store the summaries for `date`.
    pub fn save(&self, date: &str, summaries: Vec<MatchSummary>) {
        self.store.put(date, summaries);
    }

    /// Sweep expired entries periodically.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        self.store.spawn_purge_task(every)
    }
}

/// Cache for chat preferences, keyed by chat id.
#[derive(Debug, Clone)]
pub struct ChatPreferencesCache {
    store: ExpiringStore<ChatPreferences>,
}

impl ChatPreferencesCache {
    /// Create the cache from its configuration section.
    pub fn new(config: &ExpiringStoreConfig) -> Self {
        Self {
            store: ExpiringStore::from_config("chat_preferences", config),
        }
    }

    pub(crate) fn key(chat: ChatId) -> String {
        chat.to_string()
    }

    /// Cached preferences of a chat.
    pub fn get(&self, chat: ChatId) -> Option<ChatPreferences> {
        self.store.get(&Self::key(chat))
    }

    /// Store the preferences of a chat.
    pub fn save(&self, chat: ChatId, preferences: ChatPreferences) {
        self.store.put(Self::key(chat), preferences);
    }

    /// Revision of the latest write; see [`Self::save_unless_newer`].
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Store the preferences of a chat unless they were saved again after
    /// `since` was read from [`Self::revision`]. Returns whether they were stored.
    pub fn save_unless_newer(&self, chat: ChatId, preferences: ChatPreferences, since: u64) -> bool {
        self.store.put_unless_newer(Self::key(chat), preferences, since)
    }

    /// Sweep expired entries periodically.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        self.store.spawn_purge_task(every)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_keys_are_decimal_strings() {
        assert_eq!(MatchesCache::key(2021), "2021");
        assert_eq!(TableCache::key(2014), "2014");
        assert_eq!(ChatPreferencesCache::key(ChatId(-100123)), "-100123");
    }

    #[test]
    fn test_wrappers_are_independent() {
        let config = ExpiringStoreConfig::new(60);
        let matches = MatchesCache::new(&config);
        let tables = TableCache::new(&config);

        tables.save(
            2021,
            CompetitionTable {
                competition_id: 2021,
                standings: vec![],
            },
        );

        assert!(matches.get(2021).is_none());
        assert!(tables.get(2021).is_some());
    }

    #[test]
    fn test_preferences_saved_after_revision_are_kept() {
        let cache = ChatPreferencesCache::new(&ExpiringStoreConfig::new(1800));
        let chat = ChatId(100);
        let since = cache.revision();

        cache.save(chat, ChatPreferences { on_fire_mode: true });

        assert!(!cache.save_unless_newer(chat, ChatPreferences::default(), since));
        assert_eq!(cache.get(chat), Some(ChatPreferences { on_fire_mode: true }));
        assert!(cache.save_unless_newer(chat, ChatPreferences::default(), cache.revision()));
        assert_eq!(cache.get(chat), Some(ChatPreferences::default()));
    }
}
