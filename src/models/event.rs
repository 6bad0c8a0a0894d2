//! Event and team references (owned by the external directory).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Unique identifier for a team (scoped to an event via approved registration).
pub type TeamId = Uuid;

/// Unique identifier for an authenticated user (event owner / organizer).
pub type UserId = Uuid;

/// Competition format of an event. Decides which generator/advancer handles it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    RoundRobin,
    SingleElimination,
    Leaderboard,
}

/// Lifecycle status of an event. The engine only ever writes `Finished`;
/// `Canceled` belongs to the external event component.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Active,
    Finished,
    Canceled,
}

/// Read-side view of an event as supplied by the directory.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    pub event_id: EventId,
    pub name: String,
    pub format: Format,
    pub owner_id: UserId,
    pub status: EventStatus,
}

/// An approved team registration for an event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub team_id: TeamId,
    pub name: String,
}

impl TeamRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            team_id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
