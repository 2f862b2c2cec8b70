use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Tournament, TournamentDetails};
use crate::engine::TournamentId;

const TOURNAMENT_COLUMNS: &str =
    "id, name, elimination_type, number_of_groups, started, created_at";

pub fn insert_tournament(conn: &Connection, details: &TournamentDetails) -> Result<Tournament> {
    let sql = format!(
        "INSERT INTO tournaments (name, elimination_type, number_of_groups) VALUES (?1, ?2, ?3) RETURNING {TOURNAMENT_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![details.name, details.elimination_type, details.number_of_groups],
        parse_tournament_row,
    )
    .context("Failed to insert new tournament")
}

pub fn update_details(
    conn: &Connection,
    id: TournamentId,
    details: &TournamentDetails,
) -> Result<Option<Tournament>> {
    let sql = format!(
        "UPDATE tournaments SET name = ?1, elimination_type = ?2, number_of_groups = ?3 WHERE id = ?4 RETURNING {TOURNAMENT_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![details.name, details.elimination_type, details.number_of_groups, id],
        parse_tournament_row,
    )
    .optional()
    .context("Failed to update tournament")
}

pub fn set_number_of_groups(
    conn: &Connection,
    id: TournamentId,
    number_of_groups: i64,
) -> Result<()> {
    conn.execute(
        "UPDATE tournaments SET number_of_groups = ?1 WHERE id = ?2",
        params![number_of_groups, id],
    )
    .context("Failed to update number of groups")
    .map(|_| ())
}

pub fn mark_started(conn: &Connection, id: TournamentId) -> Result<()> {
    conn.execute("UPDATE tournaments SET started = 1 WHERE id = ?1", params![id])
        .context("Failed to mark tournament as started")
        .map(|_| ())
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        elimination_type: row.get(2)?,
        number_of_groups: row.get(3)?,
        started: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn find_by_id(conn: &Connection, id: TournamentId) -> Result<Option<Tournament>> {
    let sql = format!("SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Tournament>> {
    let sql = format!("SELECT {TOURNAMENT_COLUMNS} FROM tournaments ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
