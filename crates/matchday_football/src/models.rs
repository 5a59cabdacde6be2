//! Payloads cached on behalf of the bot.
//!
//! The cache treats these as opaque; the only thing it asks of them is the
//! [`Populated`] emptiness rule.

use chrono::{DateTime, Utc};
use matchday_cache::Populated;
use serde::{Deserialize, Serialize};

/// A competition offered by the football API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competition {
    /// Upstream identifier
    pub id: u64,
    /// Display name (e.g., "Premier League")
    pub name: String,
    /// Short code (e.g., "PL")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Country or region the competition belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Lifecycle of a match as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Announced without a confirmed kick-off time
    Scheduled,
    /// Kick-off time confirmed
    Timed,
    /// Currently being played
    InPlay,
    /// Half-time or another interruption
    Paused,
    /// Final whistle
    Finished,
    /// Moved to a later date
    Postponed,
    /// Interrupted and not resumed
    Suspended,
    /// Will not be played
    Cancelled,
}

/// Goals per side; `None` until the match has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    /// Home team goals
    pub home: Option<u32>,
    /// Away team goals
    pub away: Option<u32>,
}

/// A single fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Upstream identifier
    pub id: u64,
    /// Kick-off time
    pub utc_date: DateTime<Utc>,
    /// Current status
    pub status: MatchStatus,
    /// Home team name
    pub home_team: String,
    /// Away team name
    pub away_team: String,
    /// Current or final score
    #[serde(default)]
    pub score: Score,
}

/// The matches of one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionMatches {
    /// Competition the matches belong to
    pub competition_id: u64,
    /// Fixtures, in upstream order
    pub matches: Vec<Match>,
}

impl Populated for CompetitionMatches {
    fn is_populated(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Table position, starting at 1
    pub position: u32,
    /// Team name
    pub team: String,
    /// Matches played
    pub played_games: u32,
    /// Wins
    pub won: u32,
    /// Draws
    pub draw: u32,
    /// Losses
    pub lost: u32,
    /// Points
    pub points: u32,
    /// Goals scored minus goals conceded
    pub goal_difference: i32,
}

/// League table of one competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionTable {
    /// Competition the table belongs to
    pub competition_id: u64,
    /// Rows ordered by position
    pub standings: Vec<Standing>,
}

impl Populated for CompetitionTable {
    fn is_populated(&self) -> bool {
        !self.standings.is_empty()
    }
}

/// The matches a competition has on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Competition the matches belong to
    pub competition: Competition,
    /// That day's fixtures
    pub matches: Vec<Match>,
}

/// Chat identifier as assigned by the messaging platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ChatId(pub i64);

/// Per-chat preference flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChatPreferences {
    /// Decorate goal notifications with extra emphasis
    pub on_fire_mode: bool,
}

impl Populated for ChatPreferences {
    fn is_populated(&self) -> bool {
        true
    }
}
