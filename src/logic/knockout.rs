//! Single-elimination bracket: construction with byes and a play-in round,
//! and winner propagation along the match DAG.

use crate::logic::team_name;
use crate::models::{
    EngineError, EventId, KnockoutMatch, KnockoutMatchView, KnockoutStatus, MatchId, TeamId,
    TeamRef,
};
use crate::store::EventMatches;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// A slot filler for the first full round: either a team seeded directly
/// (a bye) or the future winner of a play-in match.
#[derive(Clone, Copy, Debug)]
enum Entrant {
    Team(TeamId),
    PendingWinner(MatchId),
}

/// Build the full bracket for `teams` in one pass.
///
/// With n teams and bracket_size the next power of two, `bracket_size - n`
/// teams are seeded straight into the first full round (byes) and the rest
/// play a play-in round at `round_label = bracket_size`. Seeding is a
/// uniform shuffle; skill-based seeding is out of scope. Returns the number
/// of matches created, which is always n - 1.
pub fn generate_bracket(
    matches: &mut EventMatches,
    event_id: EventId,
    teams: &[TeamRef],
) -> Result<usize, EngineError> {
    if !matches.knockout.is_empty() {
        return Err(EngineError::AlreadyGenerated);
    }
    let n = teams.len();
    if n < 2 {
        return Err(EngineError::InsufficientTeams { found: n });
    }

    let mut rng = rand::thread_rng();
    let mut pool: Vec<TeamId> = teams.iter().map(|t| t.team_id).collect();
    pool.shuffle(&mut rng);

    let bracket_size = (n as u32).next_power_of_two();
    let bye_count = bracket_size as usize - n;
    let play_in_count = n - bye_count; // always even

    let mut rows: Vec<KnockoutMatch> = Vec::with_capacity(n - 1);
    for (i, pair) in pool[..play_in_count].chunks_exact(2).enumerate() {
        rows.push(KnockoutMatch::seeded(
            event_id,
            bracket_size,
            i as u32 + 1,
            pair[0],
            pair[1],
        ));
    }
    let byes = &pool[play_in_count..];

    // two teams: the single play-in match is the final
    if n == 2 {
        return matches.insert_knockout_matches(rows);
    }

    // empty matches for every deeper round, half as many per halving
    let mut width = bracket_size / 2;
    while width >= 2 {
        for number in 1..=(width / 2) {
            rows.push(KnockoutMatch::empty(event_id, width, number));
        }
        width /= 2;
    }

    // link each pair of matches at depth >= 4 into the match one depth up
    let mut width = bracket_size / 2;
    while width >= 4 {
        let children: Vec<MatchId> = rows
            .iter()
            .filter(|m| m.round_label == width)
            .map(|m| m.match_id)
            .collect();
        for (i, pair) in children.chunks_exact(2).enumerate() {
            let parent_width = width / 2;
            let parent_number = i as u32 + 1;
            if let Some(parent) = rows
                .iter_mut()
                .find(|m| m.round_label == parent_width && m.match_number == parent_number)
            {
                parent.team1_source_match_id = Some(pair[0]);
                parent.team2_source_match_id = Some(pair[1]);
            }
        }
        width /= 2;
    }

    // fill the first full round: byes enter as teams, play-ins as winner refs
    let mut entrants: Vec<Entrant> = byes.iter().copied().map(Entrant::Team).collect();
    entrants.extend(
        rows.iter()
            .filter(|m| m.round_label == bracket_size)
            .map(|m| Entrant::PendingWinner(m.match_id)),
    );
    entrants.shuffle(&mut rng);

    let first_full = bracket_size / 2;
    for (i, pair) in entrants.chunks_exact(2).enumerate() {
        let number = i as u32 + 1;
        if let Some(m) = rows
            .iter_mut()
            .find(|m| m.round_label == first_full && m.match_number == number)
        {
            match pair[0] {
                Entrant::Team(team) => m.team1_id = Some(team),
                Entrant::PendingWinner(source) => m.team1_source_match_id = Some(source),
            }
            match pair[1] {
                Entrant::Team(team) => m.team2_id = Some(team),
                Entrant::PendingWinner(source) => m.team2_source_match_id = Some(source),
            }
            if m.team1_id.is_some() && m.team2_id.is_some() {
                m.status = KnockoutStatus::Ready;
            }
        }
    }

    matches.insert_knockout_matches(rows)
}

/// Record a knockout result and push the winner into the downstream slot.
///
/// At most one match references the finished one as a source; when both of
/// its slots are populated afterwards it becomes Ready. If nothing
/// references it, this was the final and its winner is the tournament
/// winner.
pub fn submit_result(
    matches: &mut EventMatches,
    match_id: MatchId,
    team1_score: u32,
    team2_score: u32,
) -> Result<(), EngineError> {
    let m = matches
        .knockout_match_mut(match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;
    match m.status {
        KnockoutStatus::Finished => return Err(EngineError::AlreadyFinished),
        KnockoutStatus::Pending => return Err(EngineError::NotReady),
        KnockoutStatus::Ready => {}
    }
    if team1_score == team2_score {
        return Err(EngineError::DrawNotAllowed);
    }

    // Ready guarantees both slots hold teams
    let winner = if team1_score > team2_score {
        m.team1_id
    } else {
        m.team2_id
    }
    .ok_or(EngineError::NotReady)?;

    m.team1_score = Some(team1_score);
    m.team2_score = Some(team2_score);
    m.winner_id = Some(winner);
    m.status = KnockoutStatus::Finished;
    let finished_id = m.match_id;

    if let Some(downstream) = matches.knockout.iter_mut().find(|d| {
        d.team1_source_match_id == Some(finished_id)
            || d.team2_source_match_id == Some(finished_id)
    }) {
        if downstream.team1_source_match_id == Some(finished_id) {
            downstream.team1_id = Some(winner);
        } else {
            downstream.team2_id = Some(winner);
        }
        if downstream.status == KnockoutStatus::Pending
            && downstream.team1_id.is_some()
            && downstream.team2_id.is_some()
        {
            downstream.status = KnockoutStatus::Ready;
        }
    }
    Ok(())
}

/// The full match graph with team names resolved, deepest round first
/// (play-ins, then each halving down to the final).
pub fn bracket_view(
    matches: &EventMatches,
    names: &HashMap<TeamId, String>,
) -> Vec<KnockoutMatchView> {
    let mut views: Vec<KnockoutMatchView> = matches
        .knockout
        .iter()
        .map(|m| KnockoutMatchView {
            match_id: m.match_id,
            round_label: m.round_label,
            match_number: m.match_number,
            team1_id: m.team1_id,
            team1_name: m.team1_id.map(|id| team_name(names, id)),
            team2_id: m.team2_id,
            team2_name: m.team2_id.map(|id| team_name(names, id)),
            team1_source_match_id: m.team1_source_match_id,
            team2_source_match_id: m.team2_source_match_id,
            team1_score: m.team1_score,
            team2_score: m.team2_score,
            winner_id: m.winner_id,
            status: m.status,
        })
        .collect();
    views.sort_by(|a, b| {
        b.round_label
            .cmp(&a.round_label)
            .then(a.match_number.cmp(&b.match_number))
    });
    views
}
