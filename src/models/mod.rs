//! Data structures for the tournament engine: events, matches, rankings.

mod error;
mod event;
mod knockout;
mod leaderboard;
mod round_robin;

pub use error::{EngineError, ErrorKind};
pub use event::{EventId, EventRef, EventStatus, Format, TeamId, TeamRef, UserId};
pub use knockout::{KnockoutMatch, KnockoutMatchView, KnockoutStatus};
pub use leaderboard::{
    LeaderboardRankRow, LeaderboardRound, LeaderboardRoundScore, LeaderboardRoundsView,
    LeaderboardScoreEntry, TeamPoints,
};
pub use round_robin::{
    MatchId, RankingRow, RoundRobinMatch, RoundRobinMatchView, RoundRobinSettings,
    RoundRobinStatus,
};
