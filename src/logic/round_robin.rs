//! Round-robin: all-pairs schedule generation, result recording, standings.

use crate::logic::team_name;
use crate::models::{
    EngineError, EventId, MatchId, RankingRow, RoundRobinMatch, RoundRobinMatchView,
    RoundRobinStatus, TeamId, TeamRef,
};
use crate::store::EventMatches;
use std::collections::HashMap;

/// Create one Pending match per unordered pair of approved teams.
/// Returns the number of matches created: n(n-1)/2.
pub fn generate_schedule(
    matches: &mut EventMatches,
    event_id: EventId,
    teams: &[TeamRef],
) -> Result<usize, EngineError> {
    if !matches.round_robin.is_empty() {
        return Err(EngineError::AlreadyGenerated);
    }
    if teams.len() < 2 {
        return Err(EngineError::InsufficientTeams { found: teams.len() });
    }

    let mut rows = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            rows.push(RoundRobinMatch::new(
                event_id,
                teams[i].team_id,
                teams[j].team_id,
            ));
        }
    }
    matches.insert_round_robin_matches(rows)
}

/// Record a result. Winner is the higher-scoring team, or nobody on a draw.
/// Round-robin matches are mutually independent; there is no advancement.
pub fn submit_result(
    matches: &mut EventMatches,
    match_id: MatchId,
    team1_score: u32,
    team2_score: u32,
) -> Result<(), EngineError> {
    let m = matches
        .round_robin_match_mut(match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;
    if m.status == RoundRobinStatus::Finished {
        return Err(EngineError::AlreadyFinished);
    }

    m.team1_score = Some(team1_score);
    m.team2_score = Some(team2_score);
    m.winner_id = if team1_score > team2_score {
        Some(m.team1_id)
    } else if team2_score > team1_score {
        Some(m.team2_id)
    } else {
        None
    };
    m.status = RoundRobinStatus::Finished;
    Ok(())
}

/// The schedule with team names resolved.
pub fn schedule_view(
    matches: &EventMatches,
    names: &HashMap<TeamId, String>,
) -> Vec<RoundRobinMatchView> {
    matches
        .round_robin
        .iter()
        .map(|m| RoundRobinMatchView {
            match_id: m.match_id,
            team1_id: m.team1_id,
            team1_name: team_name(names, m.team1_id),
            team2_id: m.team2_id,
            team2_name: team_name(names, m.team2_id),
            team1_score: m.team1_score,
            team2_score: m.team2_score,
            winner_id: m.winner_id,
            status: m.status,
        })
        .collect()
}

#[derive(Clone, Copy, Default)]
struct Tally {
    points: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
}

/// Aggregate finished matches into standings, sorted descending by
/// (points, goal difference, goals for) with dense ranks. Teams with no
/// finished match do not appear in the table.
pub fn compute_ranking(
    matches: &EventMatches,
    names: &HashMap<TeamId, String>,
) -> Result<Vec<RankingRow>, EngineError> {
    let settings = matches
        .settings
        .as_ref()
        .ok_or(EngineError::SettingsNotConfigured)?;

    let mut tallies: HashMap<TeamId, Tally> = HashMap::new();
    for m in &matches.round_robin {
        if m.status != RoundRobinStatus::Finished {
            continue;
        }
        let (Some(s1), Some(s2)) = (m.team1_score, m.team2_score) else {
            continue;
        };
        // one contribution row per side
        for (team, scored, conceded) in [(m.team1_id, s1, s2), (m.team2_id, s2, s1)] {
            let t = tallies.entry(team).or_default();
            t.goals_for += scored;
            t.goals_against += conceded;
            if scored > conceded {
                t.wins += 1;
                t.points += settings.points_per_win;
            } else if scored == conceded {
                t.draws += 1;
                t.points += settings.points_per_draw;
            } else {
                t.losses += 1;
                t.points += settings.points_per_loss;
            }
        }
    }

    let mut rows: Vec<RankingRow> = tallies
        .into_iter()
        .map(|(team_id, t)| RankingRow {
            rank: 0,
            team_id,
            team_name: team_name(names, team_id),
            points: t.points,
            wins: t.wins,
            draws: t.draws,
            losses: t.losses,
            goals_for: t.goals_for,
            goals_against: t.goals_against,
            goal_difference: i64::from(t.goals_for) - i64::from(t.goals_against),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(a.team_name.cmp(&b.team_name))
    });

    // dense rank: ties share a rank, the next distinct key is rank + 1
    let mut rank = 0;
    let mut previous: Option<(u32, i64, u32)> = None;
    for row in &mut rows {
        let key = (row.points, row.goal_difference, row.goals_for);
        if previous != Some(key) {
            rank += 1;
            previous = Some(key);
        }
        row.rank = rank;
    }
    Ok(rows)
}
