//! Match repository: per-event storage of match rows, settings, and score
//! entries, with transactional mutation.
//!
//! Each event's rows live behind their own lock, held for the whole
//! transaction. The mutation closure runs against a working copy that is
//! swapped in only on success, so a failure partway through generation or
//! advancement leaves nothing observable. Holding the lock across the
//! check-then-insert in `insert_*_matches` is what makes generation
//! happen at most once per event under concurrent requests.

use crate::models::{
    EngineError, EventId, KnockoutMatch, LeaderboardScoreEntry, MatchId, RoundRobinMatch,
    RoundRobinSettings,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// All engine-owned rows for one event.
#[derive(Clone, Debug, Default)]
pub struct EventMatches {
    pub round_robin: Vec<RoundRobinMatch>,
    pub settings: Option<RoundRobinSettings>,
    pub knockout: Vec<KnockoutMatch>,
    pub leaderboard: Vec<LeaderboardScoreEntry>,
}

impl EventMatches {
    /// Bulk-insert the round-robin schedule. The repository's one enforced
    /// invariant: generation happens at most once per event.
    pub fn insert_round_robin_matches(
        &mut self,
        matches: Vec<RoundRobinMatch>,
    ) -> Result<usize, EngineError> {
        if !self.round_robin.is_empty() {
            return Err(EngineError::AlreadyGenerated);
        }
        let created = matches.len();
        self.round_robin = matches;
        Ok(created)
    }

    /// Bulk-insert the knockout bracket; same at-most-once rule.
    pub fn insert_knockout_matches(
        &mut self,
        matches: Vec<KnockoutMatch>,
    ) -> Result<usize, EngineError> {
        if !self.knockout.is_empty() {
            return Err(EngineError::AlreadyGenerated);
        }
        let created = matches.len();
        self.knockout = matches;
        Ok(created)
    }

    pub fn round_robin_match_mut(&mut self, match_id: MatchId) -> Option<&mut RoundRobinMatch> {
        self.round_robin.iter_mut().find(|m| m.match_id == match_id)
    }

    pub fn knockout_match_mut(&mut self, match_id: MatchId) -> Option<&mut KnockoutMatch> {
        self.knockout.iter_mut().find(|m| m.match_id == match_id)
    }

    /// Whole-row settings upsert.
    pub fn upsert_settings(&mut self, settings: RoundRobinSettings) {
        self.settings = Some(settings);
    }

    /// Insert-or-update keyed on (team, round); the event id is fixed per
    /// record set.
    pub fn upsert_score_entry(&mut self, entry: LeaderboardScoreEntry) {
        match self
            .leaderboard
            .iter_mut()
            .find(|e| e.team_id == entry.team_id && e.round_number == entry.round_number)
        {
            Some(existing) => {
                existing.points = entry.points;
                existing.last_modified_at = entry.last_modified_at;
            }
            None => self.leaderboard.push(entry),
        }
    }
}

/// In-memory repository: one record set per event, created lazily.
#[derive(Default)]
pub struct MatchStore {
    events: RwLock<HashMap<EventId, Arc<Mutex<EventMatches>>>>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event_id: EventId) -> Result<Arc<Mutex<EventMatches>>, EngineError> {
        if let Some(rec) = self
            .events
            .read()
            .map_err(|_| EngineError::Transaction)?
            .get(&event_id)
        {
            return Ok(Arc::clone(rec));
        }
        let mut g = self.events.write().map_err(|_| EngineError::Transaction)?;
        Ok(Arc::clone(g.entry(event_id).or_default()))
    }

    /// Run a mutation against the event's rows with commit-or-rollback
    /// semantics. The per-event lock is held for the whole closure.
    pub fn transaction<R>(
        &self,
        event_id: EventId,
        f: impl FnOnce(&mut EventMatches) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        let record = self.record(event_id)?;
        let mut guard = record.lock().map_err(|_| EngineError::Transaction)?;
        let mut working = guard.clone();
        let result = f(&mut working)?;
        *guard = working;
        Ok(result)
    }

    /// Read-only access to the event's rows.
    pub fn read<R>(
        &self,
        event_id: EventId,
        f: impl FnOnce(&EventMatches) -> R,
    ) -> Result<R, EngineError> {
        let record = self.record(event_id)?;
        let guard = record.lock().map_err(|_| EngineError::Transaction)?;
        Ok(f(&guard))
    }
}
