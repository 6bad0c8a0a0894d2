//! Leaderboard score entries and the summed ranking.

use crate::models::event::{EventId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-round, per-team points. Unique per (event, team, round); a round may
/// be re-submitted and overwritten any time before the event finishes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardScoreEntry {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub round_number: u32,
    pub points: u32,
    pub last_modified_at: DateTime<Utc>,
}

/// One team's points in a round submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamPoints {
    pub team_id: TeamId,
    pub points: u32,
}

/// One team's points within a round (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRoundScore {
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
}

/// A round with its scores, descending by points.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRound {
    pub round_number: u32,
    pub scores: Vec<LeaderboardRoundScore>,
}

/// All stored rounds plus the advised number for the next submission
/// (`max(existing) + 1`; display hint only, the organizer picks the number).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRoundsView {
    pub rounds: Vec<LeaderboardRound>,
    pub next_round_number: u32,
}

/// One row of the summed ranking. Dense rank on total points only; there is
/// deliberately no secondary tie-break.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRankRow {
    pub rank: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub total_points: u32,
}
