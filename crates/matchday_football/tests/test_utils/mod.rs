//! Test utilities for football data tests.
//!
//! In-memory stand-ins for the football API and the preferences repository,
//! counting how often the cache layer reaches them.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use matchday_error::{UpstreamError, UpstreamErrorKind};
use matchday_football::{
    ChatId, ChatPreferences, ChatPreferencesRepository, Competition, CompetitionMatches,
    CompetitionTable, FootballApi, FootballResult, Match, MatchStatus, MatchSummary, Score,
    Standing,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Simulated network latency of every upstream call.
pub const LATENCY: Duration = Duration::from_millis(50);

/// Mock football API with configurable responses and call counters.
#[derive(Default)]
pub struct MockFootballApi {
    competitions: Mutex<Vec<Competition>>,
    matches: Mutex<HashMap<u64, CompetitionMatches>>,
    tables: Mutex<HashMap<u64, CompetitionTable>>,
    summaries: Mutex<Vec<MatchSummary>>,
    failure: Mutex<Option<UpstreamError>>,
    competitions_calls: AtomicUsize,
    matches_calls: AtomicUsize,
    table_calls: AtomicUsize,
    summaries_calls: AtomicUsize,
}

impl MockFootballApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_competitions(self, competitions: Vec<Competition>) -> Self {
        *self.competitions.lock().unwrap() = competitions;
        self
    }

    pub fn with_matches(self, matches: CompetitionMatches) -> Self {
        self.matches
            .lock()
            .unwrap()
            .insert(matches.competition_id, matches);
        self
    }

    pub fn with_table(self, table: CompetitionTable) -> Self {
        self.tables.lock().unwrap().insert(table.competition_id, table);
        self
    }

    pub fn with_summaries(self, summaries: Vec<MatchSummary>) -> Self {
        *self.summaries.lock().unwrap() = summaries;
        self
    }

    /// Make every subsequent call fail with `kind`.
    pub fn fail_with(&self, kind: UpstreamErrorKind) {
        *self.failure.lock().unwrap() = Some(UpstreamError::new(kind));
    }

    /// Let subsequent calls succeed again.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn competitions_calls(&self) -> usize {
        self.competitions_calls.load(Ordering::SeqCst)
    }

    pub fn matches_calls(&self) -> usize {
        self.matches_calls.load(Ordering::SeqCst)
    }

    pub fn table_calls(&self) -> usize {
        self.table_calls.load(Ordering::SeqCst)
    }

    pub fn summaries_calls(&self) -> usize {
        self.summaries_calls.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, counter: &AtomicUsize, value: T) -> FootballResult<T> {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(LATENCY).await;
        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl FootballApi for MockFootballApi {
    async fn competitions(&self) -> FootballResult<Vec<Competition>> {
        let competitions = self.competitions.lock().unwrap().clone();
        self.respond(&self.competitions_calls, competitions).await
    }

    async fn matches(&self, competition_id: u64) -> FootballResult<Option<CompetitionMatches>> {
        let matches = self.matches.lock().unwrap().get(&competition_id).cloned();
        self.respond(&self.matches_calls, matches).await
    }

    async fn table(&self, competition_id: u64) -> FootballResult<Option<CompetitionTable>> {
        let table = self.tables.lock().unwrap().get(&competition_id).cloned();
        self.respond(&self.table_calls, table).await
    }

    async fn match_summaries(
        &self,
        _date: &str,
        competitions: &[Competition],
    ) -> FootballResult<Vec<MatchSummary>> {
        let summaries: Vec<MatchSummary> = self
            .summaries
            .lock()
            .unwrap()
            .iter()
            .filter(|summary| competitions.contains(&summary.competition))
            .cloned()
            .collect();
        self.respond(&self.summaries_calls, summaries).await
    }
}

/// In-memory preferences repository.
#[derive(Default)]
pub struct InMemoryPreferences {
    stored: Mutex<HashMap<ChatId, ChatPreferences>>,
    failure: Mutex<Option<UpstreamError>>,
    find_latency: Option<Duration>,
    find_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, chat: ChatId, preferences: ChatPreferences) -> Self {
        self.stored.lock().unwrap().insert(chat, preferences);
        self
    }

    /// Slow down reads; a read still sees the value stored when it started.
    pub fn with_find_latency(mut self, latency: Duration) -> Self {
        self.find_latency = Some(latency);
        self
    }

    pub fn stored(&self, chat: ChatId) -> Option<ChatPreferences> {
        self.stored.lock().unwrap().get(&chat).copied()
    }

    pub fn fail_with(&self, kind: UpstreamErrorKind) {
        *self.failure.lock().unwrap() = Some(UpstreamError::new(kind));
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatPreferencesRepository for InMemoryPreferences {
    async fn find(&self, chat: ChatId) -> FootballResult<Option<ChatPreferences>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.stored(chat);
        tokio::time::sleep(self.find_latency.unwrap_or(LATENCY)).await;
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(snapshot)
    }

    async fn save(&self, chat: ChatId, preferences: &ChatPreferences) -> FootballResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(LATENCY).await;
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.stored.lock().unwrap().insert(chat, *preferences);
        Ok(())
    }
}

pub fn competition(id: u64, name: &str, code: &str) -> Competition {
    Competition {
        id,
        name: name.to_string(),
        code: Some(code.to_string()),
        area: None,
    }
}

pub fn premier_league() -> Competition {
    competition(2021, "Premier League", "PL")
}

pub fn bundesliga() -> Competition {
    competition(2002, "Bundesliga", "BL1")
}

pub fn fixture(id: u64, home: &str, away: &str) -> Match {
    Match {
        id,
        utc_date: Utc.with_ymd_and_hms(2024, 5, 19, 15, 0, 0).unwrap(),
        status: MatchStatus::Finished,
        home_team: home.to_string(),
        away_team: away.to_string(),
        score: Score {
            home: Some(3),
            away: Some(1),
        },
    }
}

pub fn premier_league_matches() -> CompetitionMatches {
    CompetitionMatches {
        competition_id: 2021,
        matches: vec![
            fixture(1, "Manchester City", "West Ham"),
            fixture(2, "Arsenal", "Everton"),
        ],
    }
}

pub fn premier_league_table() -> CompetitionTable {
    CompetitionTable {
        competition_id: 2021,
        standings: vec![Standing {
            position: 1,
            team: "Manchester City".to_string(),
            played_games: 38,
            won: 28,
            draw: 7,
            lost: 3,
            points: 91,
            goal_difference: 62,
        }],
    }
}
