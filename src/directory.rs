//! The seam to the external event/team component.
//!
//! Authentication, event CRUD, and the registration approval workflow live
//! outside the engine; the engine only needs to resolve an event, snapshot
//! its approved teams, and flip its status to finished. `InMemoryDirectory`
//! is the implementation used by the web binary and the tests.

use crate::models::{EngineError, EventId, EventRef, EventStatus, Format, TeamId, TeamRef, UserId};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// What the engine consumes from the surrounding platform.
pub trait EventDirectory: Send + Sync {
    fn event(&self, event_id: EventId) -> Option<EventRef>;

    /// Approved team registrations for the event, in registration order.
    fn approved_teams(&self, event_id: EventId) -> Vec<TeamRef>;

    /// Set the event's status to Finished. The engine never writes any
    /// other event field.
    fn finish_event(&self, event_id: EventId) -> Result<(), EngineError>;
}

struct DirectoryEntry {
    event: EventRef,
    teams: Vec<TeamRef>,
}

/// In-memory directory: events and approved teams by event id.
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<EventId, DirectoryEntry>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event owned by `owner_id`; returns it with a fresh id.
    pub fn create_event(&self, name: impl Into<String>, format: Format, owner_id: UserId) -> EventRef {
        let event = EventRef {
            event_id: Uuid::new_v4(),
            name: name.into(),
            format,
            owner_id,
            status: EventStatus::Active,
        };
        if let Ok(mut g) = self.entries.write() {
            g.insert(
                event.event_id,
                DirectoryEntry {
                    event: event.clone(),
                    teams: Vec::new(),
                },
            );
        }
        event
    }

    /// Register a team for the event. Registrations are auto-approved here;
    /// the real approval workflow is the platform's concern.
    pub fn register_team(
        &self,
        event_id: EventId,
        name: impl Into<String>,
    ) -> Result<TeamRef, EngineError> {
        let mut g = self.entries.write().map_err(|_| EngineError::Transaction)?;
        let entry = g
            .get_mut(&event_id)
            .ok_or(EngineError::EventNotFound(event_id))?;
        let team = TeamRef::new(name);
        entry.teams.push(team.clone());
        Ok(team)
    }

    /// Name lookup for query views.
    pub fn team_name(&self, event_id: EventId, team_id: TeamId) -> Option<String> {
        let g = self.entries.read().ok()?;
        g.get(&event_id)?
            .teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| t.name.clone())
    }
}

impl EventDirectory for InMemoryDirectory {
    fn event(&self, event_id: EventId) -> Option<EventRef> {
        let g = self.entries.read().ok()?;
        g.get(&event_id).map(|e| e.event.clone())
    }

    fn approved_teams(&self, event_id: EventId) -> Vec<TeamRef> {
        match self.entries.read() {
            Ok(g) => g
                .get(&event_id)
                .map(|e| e.teams.clone())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn finish_event(&self, event_id: EventId) -> Result<(), EngineError> {
        let mut g = self.entries.write().map_err(|_| EngineError::Transaction)?;
        let entry = g
            .get_mut(&event_id)
            .ok_or(EngineError::EventNotFound(event_id))?;
        entry.event.status = EventStatus::Finished;
        Ok(())
    }
}
