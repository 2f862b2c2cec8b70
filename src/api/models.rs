use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::database::{MatchWithPlayers, Player, StandingWithPlayer, Tournament};
use crate::engine::{GroupNumber, MatchId, PlayerId, RankedStanding};
use crate::errors::{FieldErrors, ServiceResult};
use crate::services::groups::{GroupAssignment, StartSummary};
use crate::services::registration::SyncSummary;
use crate::services::scoring::{ScoreOutcome, ScoreSubmission};
use crate::services::standings::GroupStandings;
use crate::services::tournaments::TournamentForm;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRequest {
    pub name: Option<String>,
    pub players: Option<i64>,
    pub elimination_type: Option<String>,
    pub number_of_groups: Option<i64>,
}

impl From<TournamentRequest> for TournamentForm {
    fn from(req: TournamentRequest) -> Self {
        TournamentForm {
            name: req.name,
            players: req.players,
            elimination_type: req.elimination_type,
            number_of_groups: req.number_of_groups,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentResponse {
    pub id: i64,
    pub name: String,
    pub elimination_type: String,
    pub number_of_groups: i64,
    pub started: bool,
    pub created_at: Option<String>,
}

impl From<Tournament> for TournamentResponse {
    fn from(t: Tournament) -> Self {
        TournamentResponse {
            id: t.id,
            name: t.name,
            elimination_type: t.elimination_type.to_string(),
            number_of_groups: t.number_of_groups,
            started: t.started,
            created_at: t.created_at.map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListItem {
    pub id: i64,
    pub name: String,
    pub started: bool,
}

impl From<Tournament> for TournamentListItem {
    fn from(t: Tournament) -> Self {
        TournamentListItem {
            id: t.id,
            name: t.name,
            started: t.started,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncPlayersRequest {
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub name: String,
    pub group_number: Option<GroupNumber>,
}

impl From<Player> for PlayerResponse {
    fn from(p: Player) -> Self {
        PlayerResponse {
            id: p.id,
            name: p.name,
            group_number: p.group_number,
        }
    }
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub renamed: usize,
    pub created: usize,
    pub deleted: usize,
    pub players: Vec<PlayerResponse>,
}

impl SyncResponse {
    pub fn new(summary: SyncSummary, players: Vec<Player>) -> Self {
        SyncResponse {
            renamed: summary.renamed,
            created: summary.created,
            deleted: summary.deleted,
            players: players.into_iter().map(PlayerResponse::from).collect(),
        }
    }
}

/// Keys of `assignments` are player ids, e.g. `{"12": 1, "13": 2}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAssignmentRequest {
    pub number_of_groups: i64,
    #[serde(default)]
    pub assignments: BTreeMap<PlayerId, GroupNumber>,
    #[serde(default)]
    pub removed: Vec<PlayerId>,
}

impl From<GroupAssignmentRequest> for GroupAssignment {
    fn from(req: GroupAssignmentRequest) -> Self {
        GroupAssignment {
            number_of_groups: req.number_of_groups,
            assignments: req.assignments,
            removed: req.removed,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub matches_created: usize,
    pub standings_created: usize,
}

impl From<StartSummary> for StartResponse {
    fn from(s: StartSummary) -> Self {
        StartResponse {
            matches_created: s.matches_created,
            standings_created: s.standings_created,
        }
    }
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub created: usize,
}

#[derive(Serialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: MatchId,
    pub group_number: GroupNumber,
    pub player1: PlayerRef,
    pub player2: PlayerRef,
    pub score1: Option<i64>,
    pub score2: Option<i64>,
    pub played: bool,
}

impl From<MatchWithPlayers> for MatchResponse {
    fn from(m: MatchWithPlayers) -> Self {
        MatchResponse {
            id: m.game.id,
            group_number: m.game.group_number,
            player1: PlayerRef {
                id: m.game.player1_id,
                name: m.player1_name,
            },
            player2: PlayerRef {
                id: m.game.player2_id,
                name: m.player2_name,
            },
            score1: m.game.score1,
            score2: m.game.score2,
            played: m.game.played,
        }
    }
}

/// Both scores are optional so a missing one becomes a field error.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    pub score1: Option<i64>,
    pub score2: Option<i64>,
}

impl ScoreRequest {
    pub fn into_submission(self, match_id: MatchId) -> ServiceResult<ScoreSubmission> {
        let mut errors = FieldErrors::new();
        if self.score1.is_none() {
            errors.add("score1", "Score is required");
        }
        if self.score2.is_none() {
            errors.add("score2", "Score is required");
        }
        errors.into_result()?;

        Ok(ScoreSubmission {
            match_id,
            score1: self.score1.unwrap_or_default(),
            score2: self.score2.unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub diff: i64,
    pub points: i64,
    pub rank: Option<i64>,
}

impl From<StandingWithPlayer> for StandingRow {
    fn from(row: StandingWithPlayer) -> Self {
        StandingRow {
            player_id: row.standing.player_id,
            player_name: row.player_name,
            games: row.standing.games,
            wins: row.standing.wins,
            losses: row.standing.losses,
            diff: row.standing.diff,
            points: row.standing.points,
            rank: row.standing.rank,
        }
    }
}

impl From<RankedStanding> for StandingRow {
    fn from(row: RankedStanding) -> Self {
        StandingRow {
            player_id: row.player_id,
            player_name: row.player_name,
            games: row.stats.games,
            wins: row.stats.wins,
            losses: row.stats.losses,
            diff: row.stats.diff,
            points: row.points,
            rank: Some(row.rank),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStandingsResponse {
    pub group_number: GroupNumber,
    pub rows: Vec<StandingRow>,
}

impl From<GroupStandings> for GroupStandingsResponse {
    fn from(g: GroupStandings) -> Self {
        GroupStandingsResponse {
            group_number: g.group_number,
            rows: g.rows.into_iter().map(StandingRow::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub id: MatchId,
    pub group_number: GroupNumber,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub score1: Option<i64>,
    pub score2: Option<i64>,
    pub played: bool,
    pub standings: Vec<StandingRow>,
}

impl From<ScoreOutcome> for ScoreResponse {
    fn from(outcome: ScoreOutcome) -> Self {
        let game = outcome.game;
        ScoreResponse {
            id: game.id,
            group_number: game.group_number,
            player1_id: game.player1_id,
            player2_id: game.player2_id,
            score1: game.score1,
            score2: game.score2,
            played: game.played,
            standings: outcome.standings.into_iter().map(StandingRow::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
