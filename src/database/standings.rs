use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{Standing, StandingWithPlayer};
use crate::engine::{
    GroupNumber, PlayerId, RankedStanding, StandingCandidate, StandingId, TournamentId,
};

/// Returns `true` when a new row was created.
pub fn insert_if_absent(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
    group_number: GroupNumber,
) -> Result<bool> {
    let sql = "INSERT INTO standings (tournament_id, player_id, group_number) VALUES (?1, ?2, ?3) ON CONFLICT (tournament_id, player_id) DO NOTHING";

    let inserted = conn
        .execute(sql, params![tournament_id, player_id, group_number])
        .context("Failed to insert standing")?;
    Ok(inserted > 0)
}

pub fn save_ranked(conn: &Connection, row: &RankedStanding) -> Result<()> {
    let sql = "UPDATE standings SET games = ?1, wins = ?2, losses = ?3, diff = ?4, points = ?5, rank = ?6 WHERE id = ?7";

    conn.execute(
        sql,
        params![
            row.stats.games,
            row.stats.wins,
            row.stats.losses,
            row.stats.diff,
            row.points,
            row.rank,
            row.standing_id
        ],
    )
    .context("Failed to update standing")
    .map(|_| ())
}

pub fn set_rank(conn: &Connection, standing_id: StandingId, rank: i64) -> Result<()> {
    conn.execute("UPDATE standings SET rank = ?1 WHERE id = ?2", params![rank, standing_id])
        .context("Failed to set standing rank")
        .map(|_| ())
}

fn parse_standing_row(row: &rusqlite::Row) -> rusqlite::Result<Standing> {
    Ok(Standing {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        player_id: row.get(2)?,
        group_number: row.get(3)?,
        games: row.get(4)?,
        wins: row.get(5)?,
        losses: row.get(6)?,
        diff: row.get(7)?,
        points: row.get(8)?,
        rank: row.get(9)?,
    })
}

pub fn list_by_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<StandingWithPlayer>> {
    let sql = "
        SELECT
            s.id, s.tournament_id, s.player_id, s.group_number,
            s.games, s.wins, s.losses, s.diff, s.points, s.rank,
            p.name
        FROM standings s
        JOIN players p ON p.id = s.player_id
        WHERE s.tournament_id = ?1
        ORDER BY s.group_number, s.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok(StandingWithPlayer {
                standing: parse_standing_row(row)?,
                player_name: row.get(10)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_group_candidates(
    conn: &Connection,
    tournament_id: TournamentId,
    group_number: GroupNumber,
) -> Result<Vec<StandingCandidate>> {
    let sql = "
        SELECT s.id, s.player_id, p.name
        FROM standings s
        JOIN players p ON p.id = s.player_id
        WHERE s.tournament_id = ?1 AND s.group_number = ?2
        ORDER BY s.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id, group_number], |row| {
            Ok(StandingCandidate {
                standing_id: row.get(0)?,
                player_id: row.get(1)?,
                player_name: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_groups(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<GroupNumber>> {
    let sql = "SELECT DISTINCT group_number FROM standings WHERE tournament_id = ?1 ORDER BY group_number";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
