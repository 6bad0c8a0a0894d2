//! Errors for engine operations, with a coarse kind for the API boundary.

use crate::models::event::{EventId, Format};
use uuid::Uuid;

/// Errors that can occur during engine operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// No event with this id is known to the directory.
    EventNotFound(EventId),
    /// No match with this id exists for the event.
    MatchNotFound(Uuid),
    /// Matches have already been generated for this event.
    AlreadyGenerated,
    /// Fewer than 2 approved teams; nothing to generate.
    InsufficientTeams { found: usize },
    /// The match already has a recorded result.
    AlreadyFinished,
    /// The knockout match does not have both teams yet.
    NotReady,
    /// Knockout results must have a winner.
    DrawNotAllowed,
    /// Ranking requires settings to be configured first.
    SettingsNotConfigured,
    /// The caller is not the event's owner.
    NotOwner,
    /// The event has a different format than the command targets.
    FormatMismatch { expected: Format, actual: Format },
    /// The event is finished; no further mutations.
    EventFinished,
    /// A leaderboard submission must carry at least one score.
    EmptyScores,
    /// The storage transaction could not complete; state is unchanged.
    Transaction,
}

/// Taxonomy bucket of an error, used by the web layer to pick a status code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authorization,
    State,
    Transaction,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            EmptyScores => ErrorKind::Validation,
            EventNotFound(_) | MatchNotFound(_) => ErrorKind::NotFound,
            AlreadyGenerated | AlreadyFinished | NotReady | DrawNotAllowed => ErrorKind::Conflict,
            NotOwner | FormatMismatch { .. } => ErrorKind::Authorization,
            InsufficientTeams { .. } | SettingsNotConfigured | EventFinished => ErrorKind::State,
            Transaction => ErrorKind::Transaction,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::EventNotFound(_) => write!(f, "Event not found"),
            EngineError::MatchNotFound(_) => write!(f, "Match not found"),
            EngineError::AlreadyGenerated => write!(f, "Matches already generated for this event"),
            EngineError::InsufficientTeams { found } => {
                write!(f, "Need at least 2 approved teams (have {})", found)
            }
            EngineError::AlreadyFinished => write!(f, "Match already has a result"),
            EngineError::NotReady => write!(f, "Match is not ready to be played"),
            EngineError::DrawNotAllowed => write!(f, "Knockout matches cannot end in a draw"),
            EngineError::SettingsNotConfigured => {
                write!(f, "Round-robin settings are not configured")
            }
            EngineError::NotOwner => write!(f, "Only the event owner can do this"),
            EngineError::FormatMismatch { expected, actual } => {
                write!(f, "Event format is {:?}, expected {:?}", actual, expected)
            }
            EngineError::EventFinished => write!(f, "Event is finished"),
            EngineError::EmptyScores => write!(f, "Score list must not be empty"),
            EngineError::Transaction => write!(f, "Storage transaction failed"),
        }
    }
}

impl std::error::Error for EngineError {}
