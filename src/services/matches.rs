use anyhow::Context;
use log::{debug, info};
use rusqlite::Connection;

use super::tournaments::load_tournament;
use crate::database::{self, MatchWithPlayers};
use crate::engine::{self, PlayerSlot, TournamentId};
use crate::errors::{ServiceError, ServiceResult};

/// Creates every missing round-robin match for the tournament's current
/// group assignment. Existing pairs are left untouched. Runs on the
/// caller's connection or transaction; returns the number of new rows.
pub fn generate_matches(conn: &Connection, tournament_id: TournamentId) -> ServiceResult<usize> {
    load_tournament(conn, tournament_id)?;

    let slots: Vec<PlayerSlot> = database::players::list_by_tournament(conn, tournament_id)?
        .into_iter()
        .map(|p| PlayerSlot {
            player_id: p.id,
            group_number: p.group_number,
        })
        .collect();
    if slots.is_empty() {
        debug!("Tournament {} has no players; no matches generated", tournament_id);
        return Ok(0);
    }

    let pairings = engine::round_robin_pairings(&slots);
    let mut created = 0;
    for pairing in &pairings {
        if database::matches::insert_if_absent(conn, tournament_id, pairing)? {
            created += 1;
        }
    }

    info!(
        "Generated {} new matches for tournament {} ({} pairings in draw)",
        created,
        tournament_id,
        pairings.len()
    );
    Ok(created)
}

/// Atomic wrapper around [`generate_matches`].
pub fn ensure_matches(conn: &mut Connection, tournament_id: TournamentId) -> ServiceResult<usize> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    let created = generate_matches(&tx, tournament_id)?;
    tx.commit().context("Failed to commit match generation")?;
    Ok(created)
}

/// Re-runs the draw of a started tournament. Before the start the groups
/// are still editable, so no matches are written.
pub fn regenerate_matches(
    conn: &mut Connection,
    tournament_id: TournamentId,
) -> ServiceResult<usize> {
    let tournament = load_tournament(conn, tournament_id)?;
    if !tournament.started {
        return Err(ServiceError::invalid(
            "tournament",
            format!("Tournament {} has not started", tournament_id),
        ));
    }
    ensure_matches(conn, tournament_id)
}

pub fn list_matches(
    conn: &Connection,
    tournament_id: TournamentId,
) -> ServiceResult<Vec<MatchWithPlayers>> {
    load_tournament(conn, tournament_id)?;
    Ok(database::matches::list_by_tournament(conn, tournament_id)?)
}
