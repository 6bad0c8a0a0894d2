//! Leaderboard: per-round point upserts and the summed ranking.

use crate::logic::team_name;
use crate::models::{
    EngineError, EventId, LeaderboardRankRow, LeaderboardRound, LeaderboardRoundScore,
    LeaderboardRoundsView, LeaderboardScoreEntry, TeamId, TeamPoints,
};
use crate::store::EventMatches;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

/// Upsert one round of scores. Re-submitting a round overwrites the points
/// of the listed teams; the round number comes from the organizer.
pub fn submit_round(
    matches: &mut EventMatches,
    event_id: EventId,
    round_number: u32,
    scores: &[TeamPoints],
) -> Result<(), EngineError> {
    if scores.is_empty() {
        return Err(EngineError::EmptyScores);
    }
    let now = Utc::now();
    for score in scores {
        matches.upsert_score_entry(LeaderboardScoreEntry {
            event_id,
            team_id: score.team_id,
            round_number,
            points: score.points,
            last_modified_at: now,
        });
    }
    Ok(())
}

/// All stored rounds, ascending by round number with scores descending,
/// plus the advised next round number.
pub fn rounds_view(
    matches: &EventMatches,
    names: &HashMap<TeamId, String>,
) -> LeaderboardRoundsView {
    let mut by_round: BTreeMap<u32, Vec<LeaderboardRoundScore>> = BTreeMap::new();
    for entry in &matches.leaderboard {
        by_round
            .entry(entry.round_number)
            .or_default()
            .push(LeaderboardRoundScore {
                team_id: entry.team_id,
                team_name: team_name(names, entry.team_id),
                points: entry.points,
            });
    }

    let next_round_number = by_round.keys().next_back().map_or(1, |max| max + 1);
    let rounds = by_round
        .into_iter()
        .map(|(round_number, mut scores)| {
            scores.sort_by(|a, b| {
                b.points
                    .cmp(&a.points)
                    .then(a.team_name.cmp(&b.team_name))
            });
            LeaderboardRound {
                round_number,
                scores,
            }
        })
        .collect();

    LeaderboardRoundsView {
        rounds,
        next_round_number,
    }
}

/// Sum points per team across all rounds and dense-rank by the total.
/// Unlike the round-robin standings there is no secondary tie-break.
pub fn ranking(matches: &EventMatches, names: &HashMap<TeamId, String>) -> Vec<LeaderboardRankRow> {
    let mut totals: HashMap<TeamId, u32> = HashMap::new();
    for entry in &matches.leaderboard {
        *totals.entry(entry.team_id).or_default() += entry.points;
    }

    let mut rows: Vec<LeaderboardRankRow> = totals
        .into_iter()
        .map(|(team_id, total_points)| LeaderboardRankRow {
            rank: 0,
            team_id,
            team_name: team_name(names, team_id),
            total_points,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(a.team_name.cmp(&b.team_name))
    });

    let mut rank = 0;
    let mut previous: Option<u32> = None;
    for row in &mut rows {
        if previous != Some(row.total_points) {
            rank += 1;
            previous = Some(row.total_points);
        }
        row.rank = rank;
    }
    rows
}
