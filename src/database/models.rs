use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::engine::{GroupNumber, MatchId, PlayerId, StandingId, TournamentId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EliminationType {
    Single,
    #[default]
    Multi,
}

impl EliminationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EliminationType::Single => "SINGLE",
            EliminationType::Multi => "MULTI",
        }
    }
}

impl fmt::Display for EliminationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EliminationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(EliminationType::Single),
            "MULTI" => Ok(EliminationType::Multi),
            other => Err(format!("Unknown elimination type: {other}")),
        }
    }
}

impl ToSql for EliminationType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EliminationType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub elimination_type: EliminationType,
    pub number_of_groups: i64,
    pub started: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// Validated tournament fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDetails {
    pub name: String,
    pub elimination_type: EliminationType,
    pub number_of_groups: i64,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub group_number: Option<GroupNumber>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub group_number: GroupNumber,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub score1: Option<i64>,
    pub score2: Option<i64>,
    pub played: bool,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct MatchWithPlayers {
    pub game: Match,
    pub player1_name: String,
    pub player2_name: String,
}

#[derive(Debug, Clone)]
pub struct Standing {
    pub id: StandingId,
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub group_number: GroupNumber,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub diff: i64,
    pub points: i64,
    pub rank: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StandingWithPlayer {
    pub standing: Standing,
    pub player_name: String,
}
