//! Tournament match orchestration: library with models, storage, and the
//! format dispatcher.

pub mod directory;
pub mod engine;
pub mod logic;
pub mod models;
pub mod store;

pub use directory::{EventDirectory, InMemoryDirectory};
pub use engine::Engine;
pub use models::{
    EngineError, ErrorKind, EventId, EventRef, EventStatus, Format, KnockoutMatch,
    KnockoutMatchView, KnockoutStatus, LeaderboardRankRow, LeaderboardRound,
    LeaderboardRoundScore, LeaderboardRoundsView, LeaderboardScoreEntry, MatchId, RankingRow,
    RoundRobinMatch, RoundRobinMatchView, RoundRobinSettings, RoundRobinStatus, TeamId, TeamPoints,
    TeamRef, UserId,
};
pub use store::{EventMatches, MatchStore};
