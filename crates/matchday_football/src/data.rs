//! Cache-aside accessors over the football caches.

use crate::caches::{
    COMPETITIONS_KEY, ChatPreferencesCache, CompetitionsCache, MatchSummaryCache, MatchesCache,
    TableCache,
};
use crate::{
    CacheSettings, ChatId, ChatPreferences, ChatPreferencesRepository, Competition,
    CompetitionMatches, CompetitionTable, FootballApi, FootballResult, MatchSummary,
};
use matchday_cache::{InFlight, cache_aside};
use matchday_error::UpstreamError;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

struct Inner {
    api: Arc<dyn FootballApi>,
    repository: Arc<dyn ChatPreferencesRepository>,
    settings: CacheSettings,

    competitions: CompetitionsCache,
    matches: MatchesCache,
    tables: TableCache,
    match_summaries: MatchSummaryCache,
    chat_preferences: ChatPreferencesCache,

    competitions_in_flight: InFlight<Vec<Competition>, UpstreamError>,
    matches_in_flight: InFlight<CompetitionMatches, UpstreamError>,
    tables_in_flight: InFlight<CompetitionTable, UpstreamError>,
    match_summaries_in_flight: InFlight<Vec<MatchSummary>, UpstreamError>,
    chat_preferences_in_flight: InFlight<ChatPreferences, UpstreamError>,
}

/// Football data served from cache where possible.
///
/// Every accessor reads its cache first and only calls the upstream on a miss.
/// Populated results are cached; empty results and errors are not, so the next
/// call tries again. Upstream errors are returned unchanged.
///
/// Instances are explicitly constructed and own their caches, so independent
/// instances never share entries. Clones share everything.
#[derive(Clone)]
pub struct FootballData {
    inner: Arc<Inner>,
}

impl FootballData {
    /// Compose the caches described by `settings` with the upstream sources.
    pub fn new(
        api: Arc<dyn FootballApi>,
        repository: Arc<dyn ChatPreferencesRepository>,
        settings: &CacheSettings,
    ) -> Self {
        let coalesce = settings.coalesce_requests;
        debug!(coalesce, "Creating FootballData");

        Self {
            inner: Arc::new(Inner {
                api,
                repository,
                settings: settings.clone(),
                competitions: CompetitionsCache::new(&settings.competitions),
                matches: MatchesCache::new(&settings.matches),
                tables: TableCache::new(&settings.tables),
                match_summaries: MatchSummaryCache::new(&settings.match_summaries),
                chat_preferences: ChatPreferencesCache::new(&settings.chat_preferences),
                competitions_in_flight: InFlight::with_coalescing("competitions", coalesce),
                matches_in_flight: InFlight::with_coalescing("matches", coalesce),
                tables_in_flight: InFlight::with_coalescing("tables", coalesce),
                match_summaries_in_flight: InFlight::with_coalescing("match_summaries", coalesce),
                chat_preferences_in_flight: InFlight::with_coalescing("chat_preferences", coalesce),
            }),
        }
    }

    /// Settings this instance was built with.
    pub fn settings(&self) -> &CacheSettings {
        &self.inner.settings
    }

    /// Competition catalogue cache.
    pub fn competitions_cache(&self) -> &CompetitionsCache {
        &self.inner.competitions
    }

    /// Per-competition matches cache.
    pub fn matches_cache(&self) -> &MatchesCache {
        &self.inner.matches
    }

    /// Per-competition table cache.
    pub fn tables_cache(&self) -> &TableCache {
        &self.inner.tables
    }

    /// Per-date match summary cache.
    pub fn match_summaries_cache(&self) -> &MatchSummaryCache {
        &self.inner.match_summaries
    }

    /// Per-chat preferences cache.
    pub fn chat_preferences_cache(&self) -> &ChatPreferencesCache {
        &self.inner.chat_preferences
    }

    /// Competition catalogue.
    #[instrument(skip(self))]
    pub async fn competitions(&self) -> FootballResult<Option<Vec<Competition>>> {
        let api = Arc::clone(&self.inner.api);
        let reader = self.inner.competitions.clone();
        let cache = self.inner.competitions.clone();

        cache_aside(
            move || reader.get(),
            &self.inner.competitions_in_flight,
            COMPETITIONS_KEY,
            move || async move { api.competitions().await.map(Some) },
            move |competitions| cache.save(competitions),
        )
        .await
    }

    /// Matches of one competition.
    #[instrument(skip(self))]
    pub async fn matches(&self, competition_id: u64) -> FootballResult<Option<CompetitionMatches>> {
        let api = Arc::clone(&self.inner.api);
        let reader = self.inner.matches.clone();
        let cache = self.inner.matches.clone();

        cache_aside(
            move || reader.get(competition_id),
            &self.inner.matches_in_flight,
            &MatchesCache::key(competition_id),
            move || async move { api.matches(competition_id).await },
            move |matches| cache.save(competition_id, matches),
        )
        .await
    }

    /// League table of one competition.
    #[instrument(skip(self))]
    pub async fn table(&self, competition_id: u64) -> FootballResult<Option<CompetitionTable>> {
        let api = Arc::clone(&self.inner.api);
        let reader = self.inner.tables.clone();
        let cache = self.inner.tables.clone();

        cache_aside(
            move || reader.get(competition_id),
            &self.inner.tables_in_flight,
            &TableCache::key(competition_id),
            move || async move { api.table(competition_id).await },
            move |table| cache.save(competition_id, table),
        )
        .await
    }

    /// Match summaries for `date` across the competition catalogue.
    ///
    /// On a miss the catalogue is resolved first through [`Self::competitions`];
    /// without a catalogue no summaries are fetched.
    #[instrument(skip(self))]
    pub async fn match_summaries(&self, date: &str) -> FootballResult<Option<Vec<MatchSummary>>> {
        let this = self.clone();
        let reader = self.inner.match_summaries.clone();
        let cache = self.inner.match_summaries.clone();
        let read_date = date.to_string();
        let fetch_date = date.to_string();
        let save_date = date.to_string();

        cache_aside(
            move || reader.get(&read_date),
            &self.inner.match_summaries_in_flight,
            date,
            move || async move {
                let Some(competitions) = this.competitions().await? else {
                    debug!("No competitions available, skipping match summaries");
                    return Ok(None);
                };
                this.inner
                    .api
                    .match_summaries(&fetch_date, &competitions)
                    .await
                    .map(Some)
            },
            move |summaries| cache.save(&save_date, summaries),
        )
        .await
    }

    /// Preferences of a chat, read through from the repository.
    ///
    /// A repository read that started before an [`Self::update_chat_preferences`]
    /// finished does not replace the updated cache entry.
    #[instrument(skip(self))]
    pub async fn chat_preferences(&self, chat: ChatId) -> FootballResult<Option<ChatPreferences>> {
        let repository = Arc::clone(&self.inner.repository);
        let reader = self.inner.chat_preferences.clone();
        let cache = self.inner.chat_preferences.clone();
        let since = cache.revision();

        cache_aside(
            move || reader.get(chat),
            &self.inner.chat_preferences_in_flight,
            &ChatPreferencesCache::key(chat),
            move || async move { repository.find(chat).await },
            move |preferences| {
                if !cache.save_unless_newer(chat, preferences, since) {
                    debug!("Preferences updated during fetch, keeping the update");
                }
            },
        )
        .await
    }

    /// Persist new preferences for a chat and refresh its cache entry.
    ///
    /// The cache is only touched once the repository accepted the write.
    #[instrument(skip(self))]
    pub async fn update_chat_preferences(
        &self,
        chat: ChatId,
        preferences: ChatPreferences,
    ) -> FootballResult<()> {
        self.inner.repository.save(chat, &preferences).await?;
        self.inner.chat_preferences.save(chat, preferences);
        debug!("Chat preferences saved");
        Ok(())
    }

    /// Start the background sweep of every cache, if configured.
    ///
    /// Returns no handles when `purge_interval_secs` is unset.
    pub fn spawn_purge_tasks(&self) -> Vec<JoinHandle<()>> {
        let Some(every) = self.inner.settings.purge_interval() else {
            return Vec::new();
        };
        debug!(?every, "Starting cache purge tasks");

        vec![
            self.inner.competitions.spawn_purge_task(every),
            self.inner.matches.spawn_purge_task(every),
            self.inner.tables.spawn_purge_task(every),
            self.inner.match_summaries.spawn_purge_task(every),
            self.inner.chat_preferences.spawn_purge_task(every),
        ]
    }
}

impl std::fmt::Debug for FootballData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootballData")
            .field("settings", &self.inner.settings)
            .field("competitions", &self.inner.competitions)
            .field("matches", &self.inner.matches)
            .field("tables", &self.inner.tables)
            .field("match_summaries", &self.inner.match_summaries)
            .field("chat_preferences", &self.inner.chat_preferences)
            .finish_non_exhaustive()
    }
}
