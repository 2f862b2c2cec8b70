use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Match, MatchWithPlayers};
use crate::engine::{GroupNumber, MatchId, Pairing, PlayedMatch, TournamentId};

/// Skip-existing insert keyed on (tournament, player1, player2).
/// Returns `true` when a new row was created.
pub fn insert_if_absent(
    conn: &Connection,
    tournament_id: TournamentId,
    pairing: &Pairing,
) -> Result<bool> {
    let sql = "INSERT INTO matches (tournament_id, group_number, player1_id, player2_id) VALUES (?1, ?2, ?3, ?4) ON CONFLICT (tournament_id, player1_id, player2_id) DO NOTHING";

    let inserted = conn
        .execute(
            sql,
            params![
                tournament_id,
                pairing.group_number,
                pairing.player1_id,
                pairing.player2_id
            ],
        )
        .context("Failed to insert match")?;
    Ok(inserted > 0)
}

pub fn record_score(conn: &Connection, match_id: MatchId, score1: i64, score2: i64) -> Result<()> {
    conn.execute(
        "UPDATE matches SET score1 = ?1, score2 = ?2, played = 1 WHERE id = ?3",
        params![score1, score2, match_id],
    )
    .context("Failed to record match score")
    .map(|_| ())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        group_number: row.get(2)?,
        player1_id: row.get(3)?,
        player2_id: row.get(4)?,
        score1: row.get(5)?,
        score2: row.get(6)?,
        played: row.get(7)?,
    })
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<Match>> {
    let sql = "SELECT id, tournament_id, group_number, player1_id, player2_id, score1, score2, played FROM matches WHERE id = ?1";

    conn.query_row(sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn list_by_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<MatchWithPlayers>> {
    let sql = "
        SELECT
            m.id, m.tournament_id, m.group_number, m.player1_id, m.player2_id,
            m.score1, m.score2, m.played,
            p1.name, p2.name
        FROM matches m
        JOIN players p1 ON p1.id = m.player1_id
        JOIN players p2 ON p2.id = m.player2_id
        WHERE m.tournament_id = ?1
        ORDER BY m.group_number ASC, m.id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok(MatchWithPlayers {
                game: parse_match_row(row)?,
                player1_name: row.get(8)?,
                player2_name: row.get(9)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Played matches of one group with both scores set.
pub fn list_played_in_group(
    conn: &Connection,
    tournament_id: TournamentId,
    group_number: GroupNumber,
) -> Result<Vec<PlayedMatch>> {
    let sql = "
        SELECT player1_id, player2_id, score1, score2
        FROM matches
        WHERE tournament_id = ?1 AND group_number = ?2 AND played = 1
          AND score1 IS NOT NULL AND score2 IS NOT NULL
        ORDER BY id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id, group_number], |row| {
            Ok(PlayedMatch {
                player1_id: row.get(0)?,
                player2_id: row.get(1)?,
                score1: row.get(2)?,
                score2: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM matches WHERE tournament_id = ?1",
        params![tournament_id],
        |row| row.get(0),
    )
    .context("Failed to count matches")
}
