//! Format-specific tournament logic: generators, advancers, rankings.
//!
//! Functions here operate on the repository's transaction view and know
//! nothing about HTTP or authorization; the engine wraps them in guards
//! and transactions.

pub mod knockout;
pub mod leaderboard;
pub mod round_robin;

use crate::models::TeamId;
use std::collections::HashMap;

/// Resolve a team name for display. A team the directory no longer knows
/// renders by id rather than failing the query.
pub(crate) fn team_name(names: &HashMap<TeamId, String>, team_id: TeamId) -> String {
    names
        .get(&team_id)
        .cloned()
        .unwrap_or_else(|| team_id.to_string())
}
