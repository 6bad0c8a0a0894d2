//! Integration tests for the single-elimination bracket: construction with
//! byes and play-ins, the match DAG, and winner advancement.

use matchday_web::{
    Engine, EngineError, EventRef, Format, InMemoryDirectory, KnockoutMatchView, KnockoutStatus,
};
use uuid::Uuid;

fn event_with_teams(n: usize) -> (Engine<InMemoryDirectory>, EventRef) {
    let engine = Engine::new(InMemoryDirectory::new());
    let owner = Uuid::new_v4();
    let event = engine
        .directory()
        .create_event("Test cup", Format::SingleElimination, owner);
    for i in 0..n {
        engine
            .directory()
            .register_team(event.event_id, format!("Team {i}"))
            .unwrap();
    }
    (engine, event)
}

fn generated(n: usize) -> (Engine<InMemoryDirectory>, EventRef, Vec<KnockoutMatchView>) {
    let (engine, event) = event_with_teams(n);
    engine
        .generate_bracket(event.event_id, event.owner_id)
        .unwrap();
    let bracket = engine.get_bracket(event.event_id).unwrap();
    (engine, event, bracket)
}

/// How often `id` is referenced as a source slot across the bracket.
fn consumer_count(bracket: &[KnockoutMatchView], id: Uuid) -> usize {
    bracket
        .iter()
        .filter(|m| {
            m.team1_source_match_id == Some(id) || m.team2_source_match_id == Some(id)
        })
        .count()
}

#[test]
fn generate_requires_at_least_2_teams() {
    let (engine, event) = event_with_teams(1);
    assert!(matches!(
        engine.generate_bracket(event.event_id, event.owner_id),
        Err(EngineError::InsufficientTeams { found: 1 })
    ));
}

#[test]
fn two_teams_make_the_play_in_the_final() {
    let (_, _, bracket) = generated(2);
    assert_eq!(bracket.len(), 1);
    let m = &bracket[0];
    assert_eq!(m.round_label, 2);
    assert_eq!(m.status, KnockoutStatus::Ready);
    assert!(m.team1_id.is_some() && m.team2_id.is_some());
    assert!(m.team1_source_match_id.is_none() && m.team2_source_match_id.is_none());
}

#[test]
fn five_teams_build_play_in_plus_two_rounds() {
    // bracket_size 8: 3 byes, 2 play-in teams -> 1 match at label 8,
    // 2 at label 4, the final at label 2.
    let (_, _, bracket) = generated(5);
    assert_eq!(bracket.len(), 4);

    let at = |label: u32| -> Vec<&KnockoutMatchView> {
        bracket.iter().filter(|m| m.round_label == label).collect()
    };
    assert_eq!(at(8).len(), 1);
    assert_eq!(at(4).len(), 2);
    assert_eq!(at(2).len(), 1);

    let play_in = at(8)[0];
    assert_eq!(play_in.status, KnockoutStatus::Ready);
    assert_eq!(consumer_count(&bracket, play_in.match_id), 1);

    // 3 byes seeded directly into the label-4 round
    let direct: usize = at(4)
        .iter()
        .map(|m| usize::from(m.team1_id.is_some()) + usize::from(m.team2_id.is_some()))
        .sum();
    assert_eq!(direct, 3);
}

#[test]
fn bracket_is_a_dag_with_one_final() {
    for n in [2, 3, 4, 5, 6, 8, 13] {
        let (_, _, bracket) = generated(n);
        assert_eq!(bracket.len(), n - 1, "n={n}");

        let finals: Vec<_> = bracket
            .iter()
            .filter(|m| consumer_count(&bracket, m.match_id) == 0)
            .collect();
        assert_eq!(finals.len(), 1, "n={n}: exactly one unconsumed match");
        assert_eq!(finals[0].round_label, 2, "n={n}");

        for m in &bracket {
            let consumers = consumer_count(&bracket, m.match_id);
            if m.match_id != finals[0].match_id {
                assert_eq!(consumers, 1, "n={n}: non-final consumed exactly once");
            }
        }
    }
}

#[test]
fn byes_equal_bracket_size_minus_n() {
    for (n, expected_byes) in [(3, 1), (5, 3), (6, 2), (8, 0), (9, 7)] {
        let (_, _, bracket) = generated(n);
        // the first full round sits one depth below the play-ins; byes are
        // the teams seeded directly into it
        let play_in_label = bracket.iter().map(|m| m.round_label).max().unwrap();
        let direct: usize = bracket
            .iter()
            .filter(|m| m.round_label == play_in_label / 2)
            .map(|m| usize::from(m.team1_id.is_some()) + usize::from(m.team2_id.is_some()))
            .sum();
        assert_eq!(direct, expected_byes, "n={n}");
    }
}

#[test]
fn generate_twice_fails() {
    let (engine, event, bracket) = generated(4);
    assert!(matches!(
        engine.generate_bracket(event.event_id, event.owner_id),
        Err(EngineError::AlreadyGenerated)
    ));
    assert_eq!(engine.get_bracket(event.event_id).unwrap().len(), bracket.len());
}

#[test]
fn draw_is_rejected_without_state_change() {
    let (engine, event, bracket) = generated(4);
    let ready = bracket
        .iter()
        .find(|m| m.status == KnockoutStatus::Ready)
        .unwrap();
    assert!(matches!(
        engine.submit_bracket_result(event.event_id, event.owner_id, ready.match_id, 2, 2),
        Err(EngineError::DrawNotAllowed)
    ));
    let after = engine.get_bracket(event.event_id).unwrap();
    let m = after.iter().find(|m| m.match_id == ready.match_id).unwrap();
    assert_eq!(m.status, KnockoutStatus::Ready);
    assert_eq!(m.team1_score, None);
}

#[test]
fn pending_match_cannot_be_played() {
    let (engine, event, bracket) = generated(4);
    let pending = bracket
        .iter()
        .find(|m| m.status == KnockoutStatus::Pending)
        .unwrap();
    assert!(matches!(
        engine.submit_bracket_result(event.event_id, event.owner_id, pending.match_id, 1, 0),
        Err(EngineError::NotReady)
    ));
}

#[test]
fn unknown_match_fails() {
    let (engine, event, _) = generated(4);
    assert!(matches!(
        engine.submit_bracket_result(event.event_id, event.owner_id, Uuid::new_v4(), 1, 0),
        Err(EngineError::MatchNotFound(_))
    ));
}

#[test]
fn winner_advances_into_the_downstream_slot() {
    // 4 teams: two Ready play-ins at label 4 feed the final at label 2.
    let (engine, event, bracket) = generated(4);
    let play_ins: Vec<_> = bracket.iter().filter(|m| m.round_label == 4).collect();
    assert_eq!(play_ins.len(), 2);
    let final_before = bracket.iter().find(|m| m.round_label == 2).unwrap();
    assert_eq!(final_before.status, KnockoutStatus::Pending);

    engine
        .submit_bracket_result(event.event_id, event.owner_id, play_ins[0].match_id, 3, 1)
        .unwrap();
    let mid = engine.get_bracket(event.event_id).unwrap();
    let final_mid = mid.iter().find(|m| m.round_label == 2).unwrap();
    let expected_winner = play_ins[0].team1_id;
    if final_mid.team1_source_match_id == Some(play_ins[0].match_id) {
        assert_eq!(final_mid.team1_id, expected_winner);
    } else {
        assert_eq!(final_mid.team2_source_match_id, Some(play_ins[0].match_id));
        assert_eq!(final_mid.team2_id, expected_winner);
    }
    assert_eq!(final_mid.status, KnockoutStatus::Pending);

    engine
        .submit_bracket_result(event.event_id, event.owner_id, play_ins[1].match_id, 0, 2)
        .unwrap();
    let ready = engine.get_bracket(event.event_id).unwrap();
    let final_ready = ready.iter().find(|m| m.round_label == 2).unwrap();
    assert_eq!(final_ready.status, KnockoutStatus::Ready);
    assert!(final_ready.team1_id.is_some() && final_ready.team2_id.is_some());
}

#[test]
fn finished_match_cannot_be_resubmitted() {
    let (engine, event, bracket) = generated(2);
    engine
        .submit_bracket_result(event.event_id, event.owner_id, bracket[0].match_id, 1, 0)
        .unwrap();
    assert!(matches!(
        engine.submit_bracket_result(event.event_id, event.owner_id, bracket[0].match_id, 0, 1),
        Err(EngineError::AlreadyFinished)
    ));
    let after = engine.get_bracket(event.event_id).unwrap();
    assert_eq!(after[0].winner_id, after[0].team1_id);
}

#[test]
fn playing_every_match_crowns_a_winner() {
    for n in [2, 5, 6, 8] {
        let (engine, event, _) = generated(n);
        loop {
            let bracket = engine.get_bracket(event.event_id).unwrap();
            let Some(ready) = bracket.iter().find(|m| m.status == KnockoutStatus::Ready) else {
                break;
            };
            engine
                .submit_bracket_result(event.event_id, event.owner_id, ready.match_id, 2, 0)
                .unwrap();
        }

        let bracket = engine.get_bracket(event.event_id).unwrap();
        assert!(
            bracket.iter().all(|m| m.status == KnockoutStatus::Finished),
            "n={n}: every match played"
        );
        let final_match = bracket.iter().find(|m| m.round_label == 2).unwrap();
        assert!(final_match.winner_id.is_some(), "n={n}: champion decided");
    }
}
