//! Round-robin match rows, scoring settings, and ranking rows.

use crate::models::event::{EventId, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (round-robin or knockout).
pub type MatchId = Uuid;

/// Status of a round-robin match. Pairings are known up front, so there is
/// no Ready stage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundRobinStatus {
    #[default]
    Pending,
    Finished,
}

/// One match between an unordered pair of approved teams. Created once in
/// bulk at generation time; never deleted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinMatch {
    pub match_id: MatchId,
    pub event_id: EventId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    /// None until a result is recorded.
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    /// None until finished, and stays None on a draw.
    pub winner_id: Option<TeamId>,
    pub status: RoundRobinStatus,
}

impl RoundRobinMatch {
    pub fn new(event_id: EventId, team1_id: TeamId, team2_id: TeamId) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            event_id,
            team1_id,
            team2_id,
            team1_score: None,
            team2_score: None,
            winner_id: None,
            status: RoundRobinStatus::Pending,
        }
    }
}

/// Points awarded per result; exactly one row per event, upserted whole.
/// May be changed before and after schedule generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinSettings {
    pub event_id: EventId,
    pub points_per_win: u32,
    pub points_per_draw: u32,
    pub points_per_loss: u32,
}

/// A scheduled match with team names resolved (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinMatchView {
    pub match_id: MatchId,
    pub team1_id: TeamId,
    pub team1_name: String,
    pub team2_id: TeamId,
    pub team2_name: String,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub winner_id: Option<TeamId>,
    pub status: RoundRobinStatus,
}

/// One row of the computed standings table. Only teams that appear in at
/// least one finished match are ranked.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    /// Dense rank: ties share a rank, no gap after ties.
    pub rank: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}
