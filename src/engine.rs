//! Format dispatcher: resolves an event to its format, enforces
//! organizer-only mutation and the not-finished guard, and routes to the
//! matching generator/advancer. The only place that knows all three
//! formats.

use crate::directory::EventDirectory;
use crate::logic::{knockout, leaderboard, round_robin};
use crate::models::{
    EngineError, EventId, EventRef, EventStatus, Format, KnockoutMatchView, LeaderboardRankRow,
    LeaderboardRoundsView, MatchId, RankingRow, RoundRobinMatchView, RoundRobinSettings, TeamId,
    TeamPoints, UserId,
};
use crate::store::MatchStore;
use std::collections::HashMap;

pub struct Engine<D> {
    directory: D,
    store: MatchStore,
}

impl<D: EventDirectory> Engine<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            store: MatchStore::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn event(&self, event_id: EventId) -> Result<EventRef, EngineError> {
        self.directory
            .event(event_id)
            .ok_or(EngineError::EventNotFound(event_id))
    }

    /// Guards shared by every mutating command except finish: the caller
    /// owns the event, the event has the command's format, and it is not
    /// finished. Queries skip all of this.
    fn authorize_mutation(
        &self,
        event_id: EventId,
        actor: UserId,
        format: Format,
    ) -> Result<EventRef, EngineError> {
        let event = self.event(event_id)?;
        if event.owner_id != actor {
            return Err(EngineError::NotOwner);
        }
        if event.format != format {
            return Err(EngineError::FormatMismatch {
                expected: format,
                actual: event.format,
            });
        }
        if event.status == EventStatus::Finished {
            return Err(EngineError::EventFinished);
        }
        Ok(event)
    }

    fn team_names(&self, event_id: EventId) -> HashMap<TeamId, String> {
        self.directory
            .approved_teams(event_id)
            .into_iter()
            .map(|t| (t.team_id, t.name))
            .collect()
    }

    // ---- round-robin ----

    /// Upsert the per-event scoring settings. Allowed any number of times,
    /// before and after schedule generation.
    pub fn configure_round_robin_settings(
        &self,
        event_id: EventId,
        actor: UserId,
        points_per_win: u32,
        points_per_draw: u32,
        points_per_loss: u32,
    ) -> Result<RoundRobinSettings, EngineError> {
        self.authorize_mutation(event_id, actor, Format::RoundRobin)?;
        let settings = RoundRobinSettings {
            event_id,
            points_per_win,
            points_per_draw,
            points_per_loss,
        };
        self.store.transaction(event_id, |matches| {
            matches.upsert_settings(settings);
            Ok(())
        })?;
        Ok(settings)
    }

    /// Generate the all-pairs schedule from the approved-team snapshot.
    /// Returns the number of matches created.
    pub fn generate_round_robin_schedule(
        &self,
        event_id: EventId,
        actor: UserId,
    ) -> Result<usize, EngineError> {
        self.authorize_mutation(event_id, actor, Format::RoundRobin)?;
        let teams = self.directory.approved_teams(event_id);
        let created = self
            .store
            .transaction(event_id, |matches| {
                round_robin::generate_schedule(matches, event_id, &teams)
            })?;
        log::info!(
            "Generated {} round-robin matches for event {}",
            created,
            event_id
        );
        Ok(created)
    }

    pub fn submit_round_robin_result(
        &self,
        event_id: EventId,
        actor: UserId,
        match_id: MatchId,
        team1_score: u32,
        team2_score: u32,
    ) -> Result<(), EngineError> {
        self.authorize_mutation(event_id, actor, Format::RoundRobin)?;
        self.store.transaction(event_id, |matches| {
            round_robin::submit_result(matches, match_id, team1_score, team2_score)
        })
    }

    pub fn get_round_robin_schedule(
        &self,
        event_id: EventId,
    ) -> Result<Vec<RoundRobinMatchView>, EngineError> {
        self.event(event_id)?;
        let names = self.team_names(event_id);
        self.store
            .read(event_id, |matches| round_robin::schedule_view(matches, &names))
    }

    pub fn get_round_robin_ranking(&self, event_id: EventId) -> Result<Vec<RankingRow>, EngineError> {
        self.event(event_id)?;
        let names = self.team_names(event_id);
        self.store
            .read(event_id, |matches| round_robin::compute_ranking(matches, &names))?
    }

    // ---- single elimination ----

    /// Build the bracket from the approved-team snapshot. Returns the
    /// number of matches created (always one fewer than the team count).
    pub fn generate_bracket(&self, event_id: EventId, actor: UserId) -> Result<usize, EngineError> {
        self.authorize_mutation(event_id, actor, Format::SingleElimination)?;
        let teams = self.directory.approved_teams(event_id);
        let created = self.store.transaction(event_id, |matches| {
            knockout::generate_bracket(matches, event_id, &teams)
        })?;
        log::info!(
            "Generated bracket with {} matches for event {}",
            created,
            event_id
        );
        Ok(created)
    }

    pub fn submit_bracket_result(
        &self,
        event_id: EventId,
        actor: UserId,
        match_id: MatchId,
        team1_score: u32,
        team2_score: u32,
    ) -> Result<(), EngineError> {
        self.authorize_mutation(event_id, actor, Format::SingleElimination)?;
        self.store.transaction(event_id, |matches| {
            knockout::submit_result(matches, match_id, team1_score, team2_score)
        })
    }

    pub fn get_bracket(&self, event_id: EventId) -> Result<Vec<KnockoutMatchView>, EngineError> {
        self.event(event_id)?;
        let names = self.team_names(event_id);
        self.store
            .read(event_id, |matches| knockout::bracket_view(matches, &names))
    }

    // ---- leaderboard ----

    pub fn submit_leaderboard_round(
        &self,
        event_id: EventId,
        actor: UserId,
        round_number: u32,
        scores: &[TeamPoints],
    ) -> Result<(), EngineError> {
        self.authorize_mutation(event_id, actor, Format::Leaderboard)?;
        self.store.transaction(event_id, |matches| {
            leaderboard::submit_round(matches, event_id, round_number, scores)
        })
    }

    pub fn get_leaderboard_rounds(
        &self,
        event_id: EventId,
    ) -> Result<LeaderboardRoundsView, EngineError> {
        self.event(event_id)?;
        let names = self.team_names(event_id);
        self.store
            .read(event_id, |matches| leaderboard::rounds_view(matches, &names))
    }

    pub fn get_leaderboard_ranking(
        &self,
        event_id: EventId,
    ) -> Result<Vec<LeaderboardRankRow>, EngineError> {
        self.event(event_id)?;
        let names = self.team_names(event_id);
        self.store
            .read(event_id, |matches| leaderboard::ranking(matches, &names))
    }

    // ---- lifecycle ----

    /// Organizer marks the event finished. Works for every format; the only
    /// mutation allowed on an event in any non-finished status, and the one
    /// event field the engine ever writes.
    pub fn finish_event(&self, event_id: EventId, actor: UserId) -> Result<(), EngineError> {
        let event = self.event(event_id)?;
        if event.owner_id != actor {
            return Err(EngineError::NotOwner);
        }
        if event.status == EventStatus::Finished {
            return Err(EngineError::EventFinished);
        }
        self.directory.finish_event(event_id)?;
        log::info!("Event {} marked finished", event_id);
        Ok(())
    }
}
