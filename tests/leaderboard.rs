//! Integration tests for the leaderboard: round upserts, grouping, ranking.

use matchday_web::{Engine, EngineError, EventRef, Format, InMemoryDirectory, TeamPoints, TeamRef};
use uuid::Uuid;

fn event_with_teams(n: usize) -> (Engine<InMemoryDirectory>, EventRef, Vec<TeamRef>) {
    let engine = Engine::new(InMemoryDirectory::new());
    let owner = Uuid::new_v4();
    let event = engine
        .directory()
        .create_event("Test league", Format::Leaderboard, owner);
    let teams = (0..n)
        .map(|i| {
            engine
                .directory()
                .register_team(event.event_id, format!("Team {i}"))
                .unwrap()
        })
        .collect();
    (engine, event, teams)
}

fn points(team: &TeamRef, points: u32) -> TeamPoints {
    TeamPoints {
        team_id: team.team_id,
        points,
    }
}

#[test]
fn empty_submission_is_rejected() {
    let (engine, event, _) = event_with_teams(2);
    assert!(matches!(
        engine.submit_leaderboard_round(event.event_id, event.owner_id, 1, &[]),
        Err(EngineError::EmptyScores)
    ));
}

#[test]
fn rounds_group_ascending_with_scores_descending() {
    let (engine, event, teams) = event_with_teams(3);
    engine
        .submit_leaderboard_round(
            event.event_id,
            event.owner_id,
            2,
            &[points(&teams[0], 5), points(&teams[1], 9)],
        )
        .unwrap();
    engine
        .submit_leaderboard_round(
            event.event_id,
            event.owner_id,
            1,
            &[points(&teams[2], 4)],
        )
        .unwrap();

    let view = engine.get_leaderboard_rounds(event.event_id).unwrap();
    assert_eq!(view.rounds.len(), 2);
    assert_eq!(view.rounds[0].round_number, 1);
    assert_eq!(view.rounds[1].round_number, 2);
    let round2: Vec<u32> = view.rounds[1].scores.iter().map(|s| s.points).collect();
    assert_eq!(round2, vec![9, 5]);
}

#[test]
fn resubmitting_a_round_overwrites_points() {
    let (engine, event, teams) = event_with_teams(1);
    engine
        .submit_leaderboard_round(event.event_id, event.owner_id, 3, &[points(&teams[0], 10)])
        .unwrap();
    engine
        .submit_leaderboard_round(event.event_id, event.owner_id, 3, &[points(&teams[0], 7)])
        .unwrap();

    let view = engine.get_leaderboard_rounds(event.event_id).unwrap();
    assert_eq!(view.rounds.len(), 1);
    assert_eq!(view.rounds[0].scores.len(), 1);
    assert_eq!(view.rounds[0].scores[0].points, 7);

    let ranking = engine.get_leaderboard_ranking(event.event_id).unwrap();
    assert_eq!(ranking[0].total_points, 7);
}

#[test]
fn next_round_number_is_max_plus_one() {
    let (engine, event, teams) = event_with_teams(1);
    assert_eq!(
        engine
            .get_leaderboard_rounds(event.event_id)
            .unwrap()
            .next_round_number,
        1
    );
    engine
        .submit_leaderboard_round(event.event_id, event.owner_id, 4, &[points(&teams[0], 1)])
        .unwrap();
    assert_eq!(
        engine
            .get_leaderboard_rounds(event.event_id)
            .unwrap()
            .next_round_number,
        5
    );
}

#[test]
fn ranking_sums_rounds_with_dense_ranks_and_no_tiebreak() {
    let (engine, event, teams) = event_with_teams(3);
    let (a, b, c) = (&teams[0], &teams[1], &teams[2]);
    engine
        .submit_leaderboard_round(
            event.event_id,
            event.owner_id,
            1,
            &[points(a, 10), points(b, 15), points(c, 7)],
        )
        .unwrap();
    engine
        .submit_leaderboard_round(event.event_id, event.owner_id, 2, &[points(a, 5)])
        .unwrap();

    // A and B both total 15: they share rank 1, C is rank 2 (dense, no gap),
    // and nothing further separates the tied pair.
    let ranking = engine.get_leaderboard_ranking(event.event_id).unwrap();
    let row = |team: &TeamRef| {
        ranking
            .iter()
            .find(|r| r.team_id == team.team_id)
            .unwrap()
            .clone()
    };
    assert_eq!(row(a).total_points, 15);
    assert_eq!(row(b).total_points, 15);
    assert_eq!(row(a).rank, 1);
    assert_eq!(row(b).rank, 1);
    assert_eq!(row(c).rank, 2);
}
