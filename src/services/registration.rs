use anyhow::Context;
use log::info;
use rusqlite::Connection;

use super::tournaments::{ensure_not_started, load_tournament};
use crate::config::settings::SetupLimits;
use crate::database::{self, Player};
use crate::engine::{PlayerId, TournamentId};
use crate::errors::{Entity, FieldErrors, ServiceError, ServiceResult};

/// Result of a bulk player sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub renamed: usize,
    pub created: usize,
    pub deleted: usize,
}

pub fn list_players(conn: &Connection, tournament_id: TournamentId) -> ServiceResult<Vec<Player>> {
    load_tournament(conn, tournament_id)?;
    Ok(database::players::list_by_tournament(conn, tournament_id)?)
}

pub fn register_player(
    conn: &Connection,
    tournament_id: TournamentId,
    name: &str,
    limits: &SetupLimits,
) -> ServiceResult<Player> {
    let name = validate_player_name(name, limits)
        .map_err(|message| ServiceError::invalid("name", message))?;
    let tournament = load_tournament(conn, tournament_id)?;
    ensure_not_started(&tournament)?;

    let player = database::players::insert_player(conn, tournament_id, &name)?;
    info!("Registered player {} ({}) in tournament {}", player.id, player.name, tournament_id);
    Ok(player)
}

/// Makes the tournament's roster match `names`: existing players (by id)
/// are renamed positionally, extra names are created, leftovers deleted.
pub fn sync_players(
    conn: &mut Connection,
    tournament_id: TournamentId,
    names: &[String],
    limits: &SetupLimits,
) -> ServiceResult<SyncSummary> {
    let mut errors = FieldErrors::new();
    let mut cleaned = Vec::with_capacity(names.len());
    for (idx, raw) in names.iter().enumerate() {
        match validate_player_name(raw, limits) {
            Ok(name) => cleaned.push(name),
            Err(message) => errors.add(&format!("player_{idx}"), message),
        }
    }
    errors.into_result()?;

    let tournament = load_tournament(conn, tournament_id)?;
    ensure_not_started(&tournament)?;

    let tx = conn.transaction().context("Failed to open transaction")?;
    let existing = database::players::list_by_tournament(&tx, tournament_id)?;
    let mut summary = SyncSummary::default();

    for (idx, name) in cleaned.iter().enumerate() {
        match existing.get(idx) {
            Some(player) if player.name == *name => {}
            Some(player) => {
                database::players::rename_player(&tx, player.id, name)?;
                summary.renamed += 1;
            }
            None => {
                database::players::insert_player(&tx, tournament_id, name)?;
                summary.created += 1;
            }
        }
    }

    for surplus in existing.iter().skip(cleaned.len()) {
        database::players::delete_player(&tx, tournament_id, surplus.id)?;
        summary.deleted += 1;
    }

    tx.commit().context("Failed to commit player sync")?;
    info!(
        "Synced players for tournament {}: {} renamed, {} created, {} deleted",
        tournament_id, summary.renamed, summary.created, summary.deleted
    );
    Ok(summary)
}

pub fn delete_player(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> ServiceResult<()> {
    let tournament = load_tournament(conn, tournament_id)?;
    ensure_not_started(&tournament)?;

    if !database::players::delete_player(conn, tournament_id, player_id)? {
        return Err(ServiceError::not_found(Entity::Player, player_id));
    }
    info!("Deleted player {} from tournament {}", player_id, tournament_id);
    Ok(())
}

fn validate_player_name(raw: &str, limits: &SetupLimits) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    if !limits.player_name_chars.contains(&name.chars().count()) {
        return Err(format!(
            "Name must be at most {} characters",
            limits.player_name_chars.end()
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{memory_conn, seed_tournament};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_register_player_trims_name() {
        let (_pool, conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);

        let player = register_player(&conn, tid, "  Alice ", &SetupLimits::default()).unwrap();

        assert_eq!(player.name, "Alice");
        assert_eq!(player.group_number, None);
    }

    #[test]
    fn test_register_blank_name_is_rejected() {
        let (_pool, conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);

        let err = register_player(&conn, tid, "   ", &SetupLimits::default()).unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("name")));
        assert!(list_players(&conn, tid).unwrap().is_empty());
    }

    #[test]
    fn test_register_into_unknown_tournament() {
        let (_pool, conn) = memory_conn();

        let err = register_player(&conn, 5, "Alice", &SetupLimits::default()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: Entity::Tournament, .. }));
    }

    #[test]
    fn test_sync_renames_and_creates() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let limits = SetupLimits::default();
        register_player(&conn, tid, "Alice", &limits).unwrap();
        register_player(&conn, tid, "Bob", &limits).unwrap();

        let summary =
            sync_players(&mut conn, tid, &names(&["Alice", "Bobby", "Cara"]), &limits).unwrap();

        assert_eq!(
            summary,
            SyncSummary {
                renamed: 1,
                created: 1,
                deleted: 0
            }
        );
        let roster: Vec<String> = list_players(&conn, tid)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(roster, names(&["Alice", "Bobby", "Cara"]));
    }

    #[test]
    fn test_sync_deletes_surplus_players() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let limits = SetupLimits::default();
        for name in ["Alice", "Bob", "Cara"] {
            register_player(&conn, tid, name, &limits).unwrap();
        }

        let summary = sync_players(&mut conn, tid, &names(&["Alice"]), &limits).unwrap();

        assert_eq!(summary.deleted, 2);
        assert_eq!(list_players(&conn, tid).unwrap().len(), 1);
    }

    #[test]
    fn test_sync_with_blank_entry_changes_nothing() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let limits = SetupLimits::default();
        register_player(&conn, tid, "Alice", &limits).unwrap();

        let err = sync_players(&mut conn, tid, &names(&["Alicia", " "]), &limits).unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("player_1")));
        assert_eq!(list_players(&conn, tid).unwrap()[0].name, "Alice");
    }

    #[test]
    fn test_delete_player() {
        let (_pool, conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let p = register_player(&conn, tid, "Alice", &SetupLimits::default()).unwrap();

        delete_player(&conn, tid, p.id).unwrap();

        let err = delete_player(&conn, tid, p.id).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: Entity::Player, .. }));
    }
}
