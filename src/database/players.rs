use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::engine::{GroupNumber, PlayerId, TournamentId};

pub fn insert_player(conn: &Connection, tournament_id: TournamentId, name: &str) -> Result<Player> {
    let sql = "INSERT INTO players (tournament_id, name) VALUES (?1, ?2) RETURNING id, tournament_id, name, group_number, created_at";

    conn.query_row(sql, params![tournament_id, name], parse_player_row)
        .context("Failed to insert new player")
}

pub fn rename_player(conn: &Connection, player_id: PlayerId, name: &str) -> Result<()> {
    conn.execute("UPDATE players SET name = ?1 WHERE id = ?2", params![name, player_id])
        .context("Failed to rename player")
        .map(|_| ())
}

/// Returns `false` when no player with that id belongs to the tournament.
pub fn delete_player(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM players WHERE id = ?1 AND tournament_id = ?2",
            params![player_id, tournament_id],
        )
        .context("Failed to delete player")?;
    Ok(deleted > 0)
}

pub fn set_group(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
    group_number: Option<GroupNumber>,
) -> Result<()> {
    conn.execute(
        "UPDATE players SET group_number = ?1 WHERE id = ?2 AND tournament_id = ?3",
        params![group_number, player_id, tournament_id],
    )
    .context("Failed to update player group")
    .map(|_| ())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        name: row.get(2)?,
        group_number: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = "SELECT id, tournament_id, name, group_number, created_at FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Player>> {
    let sql = "SELECT id, tournament_id, name, group_number, created_at FROM players WHERE tournament_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM players WHERE tournament_id = ?1",
        params![tournament_id],
        |row| row.get(0),
    )
    .context("Failed to count players")
}
