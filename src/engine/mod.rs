pub mod pairing;
pub mod standings;
pub mod types;

pub use pairing::{DEFAULT_GROUP, round_robin_pairings};
pub use standings::{POINTS_PER_WIN, accumulate_stats, rank_standings};
pub use types::{
    GroupNumber, MatchId, Pairing, PlayedMatch, PlayerId, PlayerSlot, PlayerStats,
    RankedStanding, StandingCandidate, StandingId, TournamentId,
};
