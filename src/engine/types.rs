pub type TournamentId = i64;
pub type PlayerId = i64;
pub type MatchId = i64;
pub type StandingId = i64;
pub type GroupNumber = i64;

/// A player as seen by the pairing generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    pub player_id: PlayerId,
    /// `None` until the player has been assigned to a group.
    pub group_number: Option<GroupNumber>,
}

/// One round-robin fixture. `player1_id < player2_id` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pairing {
    pub group_number: GroupNumber,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
}

/// A match that has been marked played, with both scores present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMatch {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub score1: i64,
    pub score2: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub diff: i64,
}

/// A standing row about to be ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingCandidate {
    pub standing_id: StandingId,
    pub player_id: PlayerId,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStanding {
    pub standing_id: StandingId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub stats: PlayerStats,
    pub points: i64,
    pub rank: i64,
}
