//! Cached access to football data for the chat bot.
//!
//! Each entity kind the bot shows (competition catalogue, a competition's
//! matches, its league table, the match summaries for a day, and a chat's
//! preference flags) gets its own cache wrapper over an
//! [`ExpiringStore`](matchday_cache::ExpiringStore) with an independently
//! configured validity. [`FootballData`] composes those wrappers with the
//! upstream sources and exposes one cache-aside accessor per entity kind.
//!
//! # Example
//!
//! ```rust,ignore
//! use matchday_football::{CacheSettings, FootballData};
//! use std::sync::Arc;
//!
//! let settings = CacheSettings::load()?;
//! let data = FootballData::new(Arc::new(api_client), Arc::new(repository), &settings);
//!
//! if let Some(table) = data.table(2021).await? {
//!     println!("{} teams", table.standings.len());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caches;
mod data;
mod models;
mod settings;
mod upstream;

pub use caches::{
    COMPETITIONS_KEY, ChatPreferencesCache, CompetitionsCache, MatchSummaryCache, MatchesCache,
    TableCache,
};
pub use data::FootballData;
pub use models::{
    ChatId, ChatPreferences, Competition, CompetitionMatches, CompetitionTable, Match,
    MatchStatus, MatchSummary, Score, Standing,
};
pub use settings::CacheSettings;
pub use upstream::{ChatPreferencesRepository, FootballApi, FootballResult};
