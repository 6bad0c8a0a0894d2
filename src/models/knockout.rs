//! Knockout (single-elimination) match rows and the bracket view.

use crate::models::event::{EventId, TeamId};
use crate::models::round_robin::MatchId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a knockout match. A match is Ready once both team slots hold
/// actual teams (directly seeded, or filled in by an upstream winner).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutStatus {
    #[default]
    Pending,
    Ready,
    Finished,
}

/// One node of the bracket DAG.
///
/// `round_label` is the bracket width at this depth (8, 4, 2, ...), not a
/// sequential round index. Each team slot is populated either directly
/// (`teamN_id`) or by the winner of `teamN_source_match_id`; exactly one of
/// the two is set per slot at construction time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub match_id: MatchId,
    pub event_id: EventId,
    pub round_label: u32,
    /// 1-based position within the round; pairs (1,2), (3,4), ... feed the
    /// next round's matches 1, 2, ...
    pub match_number: u32,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub team1_source_match_id: Option<MatchId>,
    pub team2_source_match_id: Option<MatchId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub winner_id: Option<TeamId>,
    pub status: KnockoutStatus,
}

impl KnockoutMatch {
    /// A play-in match with both teams seeded directly.
    pub fn seeded(
        event_id: EventId,
        round_label: u32,
        match_number: u32,
        team1_id: TeamId,
        team2_id: TeamId,
    ) -> Self {
        Self {
            team1_id: Some(team1_id),
            team2_id: Some(team2_id),
            status: KnockoutStatus::Ready,
            ..Self::empty(event_id, round_label, match_number)
        }
    }

    /// An empty Pending match; slots are wired up during bracket linking.
    pub fn empty(event_id: EventId, round_label: u32, match_number: u32) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            event_id,
            round_label,
            match_number,
            team1_id: None,
            team2_id: None,
            team1_source_match_id: None,
            team2_source_match_id: None,
            team1_score: None,
            team2_score: None,
            winner_id: None,
            status: KnockoutStatus::Pending,
        }
    }
}

/// A bracket match with team names resolved (for API / display). Slots that
/// are still waiting on an upstream winner carry the source match id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatchView {
    pub match_id: MatchId,
    pub round_label: u32,
    pub match_number: u32,
    pub team1_id: Option<TeamId>,
    pub team1_name: Option<String>,
    pub team2_id: Option<TeamId>,
    pub team2_name: Option<String>,
    pub team1_source_match_id: Option<MatchId>,
    pub team2_source_match_id: Option<MatchId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub winner_id: Option<TeamId>,
    pub status: KnockoutStatus,
}
