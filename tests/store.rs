//! Tests for the match repository: transactional rollback and the
//! at-most-once generation invariant.

use matchday_web::{EngineError, MatchStore, RoundRobinMatch};
use uuid::Uuid;

#[test]
fn failed_transaction_leaves_no_partial_rows() {
    let store = MatchStore::new();
    let event_id = Uuid::new_v4();

    let result: Result<(), EngineError> = store.transaction(event_id, |matches| {
        matches.insert_round_robin_matches(vec![RoundRobinMatch::new(
            event_id,
            Uuid::new_v4(),
            Uuid::new_v4(),
        )])?;
        // fail after the insert: the whole transaction must roll back
        Err(EngineError::Transaction)
    });
    assert!(result.is_err());

    let count = store.read(event_id, |matches| matches.round_robin.len()).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn committed_transaction_is_visible() {
    let store = MatchStore::new();
    let event_id = Uuid::new_v4();

    store
        .transaction(event_id, |matches| {
            matches.insert_round_robin_matches(vec![RoundRobinMatch::new(
                event_id,
                Uuid::new_v4(),
                Uuid::new_v4(),
            )])
        })
        .unwrap();

    let count = store.read(event_id, |matches| matches.round_robin.len()).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn generation_is_at_most_once_per_event() {
    let store = MatchStore::new();
    let event_id = Uuid::new_v4();
    let row = || vec![RoundRobinMatch::new(event_id, Uuid::new_v4(), Uuid::new_v4())];

    store
        .transaction(event_id, |matches| matches.insert_round_robin_matches(row()))
        .unwrap();
    let second = store.transaction(event_id, |matches| matches.insert_round_robin_matches(row()));
    assert!(matches!(second, Err(EngineError::AlreadyGenerated)));
}
