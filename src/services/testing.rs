use rusqlite::Connection;

use crate::database::{self, DbConn, DbPool, EliminationType, TournamentDetails};
use crate::engine::{GroupNumber, PlayerId, TournamentId};

pub fn memory_conn() -> (DbPool, DbConn) {
    let pool = database::create_memory_pool().unwrap();
    let conn = database::get_connection(&pool).unwrap();
    (pool, conn)
}

pub fn seed_tournament(conn: &Connection, number_of_groups: i64) -> TournamentId {
    database::tournaments::insert_tournament(
        conn,
        &TournamentDetails {
            name: "Test Cup".to_string(),
            elimination_type: EliminationType::Multi,
            number_of_groups,
        },
    )
    .unwrap()
    .id
}

/// Inserts `(name, group)` players and returns their ids in order.
pub fn seed_players(
    conn: &Connection,
    tournament_id: TournamentId,
    players: &[(&str, Option<GroupNumber>)],
) -> Vec<PlayerId> {
    players
        .iter()
        .map(|(name, group)| {
            let player = database::players::insert_player(conn, tournament_id, name).unwrap();
            database::players::set_group(conn, tournament_id, player.id, *group).unwrap();
            player.id
        })
        .collect()
}
