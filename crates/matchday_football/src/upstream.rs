//! Upstream sources consumed by the cache-aside accessors.

use crate::{
    ChatId, ChatPreferences, Competition, CompetitionMatches, CompetitionTable, MatchSummary,
};
use async_trait::async_trait;
use matchday_error::UpstreamError;

/// Result type for upstream calls.
pub type FootballResult<T> = Result<T, UpstreamError>;

/// Football data provider.
///
/// Implementations own their own timeouts and retries. `Ok(None)` or an empty
/// collection means "nothing found" and is never cached; `Err` means the call
/// failed.
#[async_trait]
pub trait FootballApi: Send + Sync {
    /// Competitions the bot can report on.
    async fn competitions(&self) -> FootballResult<Vec<Competition>>;

    /// Matches of one competition.
    async fn matches(&self, competition_id: u64) -> FootballResult<Option<CompetitionMatches>>;

    /// League table of one competition.
    async fn table(&self, competition_id: u64) -> FootballResult<Option<CompetitionTable>>;

    /// Matches played on `date` across `competitions`, grouped by competition.
    async fn match_summaries(
        &self,
        date: &str,
        competitions: &[Competition],
    ) -> FootballResult<Vec<MatchSummary>>;
}

/// Durable storage for chat preferences.
#[async_trait]
pub trait ChatPreferencesRepository: Send + Sync {
    /// Stored preferences for `chat`, if any.
    async fn find(&self, chat: ChatId) -> FootballResult<Option<ChatPreferences>>;

    /// Persist preferences for `chat`.
    async fn save(&self, chat: ChatId, preferences: &ChatPreferences) -> FootballResult<()>;
}
