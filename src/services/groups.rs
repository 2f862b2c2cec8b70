use std::collections::{BTreeMap, HashSet};

use anyhow::Context;
use log::info;
use rusqlite::Connection;

use super::matches::generate_matches;
use super::standings::initialize_standings;
use super::tournaments::{ensure_not_started, load_tournament};
use crate::config::settings::SetupLimits;
use crate::database::{self, Player};
use crate::engine::{GroupNumber, PlayerId, TournamentId};
use crate::errors::{FieldErrors, ServiceError, ServiceResult};

/// Group editor submission: player id → group, plus explicit removals.
#[derive(Debug, Clone, Default)]
pub struct GroupAssignment {
    pub number_of_groups: i64,
    pub assignments: BTreeMap<PlayerId, GroupNumber>,
    pub removed: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartSummary {
    pub matches_created: usize,
    pub standings_created: usize,
}

/// Applies a group assignment in one transaction: removed and omitted
/// players lose their group, assigned players get theirs, and the
/// tournament's group count is updated.
pub fn assign_groups(
    conn: &mut Connection,
    tournament_id: TournamentId,
    assignment: &GroupAssignment,
    limits: &SetupLimits,
) -> ServiceResult<Vec<Player>> {
    let tournament = load_tournament(conn, tournament_id)?;
    ensure_not_started(&tournament)?;

    let players = database::players::list_by_tournament(conn, tournament_id)?;
    validate_assignment(assignment, &players, limits)?;

    let tx = conn.transaction().context("Failed to open transaction")?;

    for &player_id in &assignment.removed {
        database::players::set_group(&tx, tournament_id, player_id, None)?;
    }
    for player in players.iter().filter(|p| !assignment.assignments.contains_key(&p.id)) {
        database::players::set_group(&tx, tournament_id, player.id, None)?;
    }
    for (&player_id, &group) in &assignment.assignments {
        database::players::set_group(&tx, tournament_id, player_id, Some(group))?;
    }
    database::tournaments::set_number_of_groups(&tx, tournament_id, assignment.number_of_groups)?;

    let updated = database::players::list_by_tournament(&tx, tournament_id)?;
    tx.commit().context("Failed to commit group assignment")?;

    info!(
        "Assigned {} players to {} groups in tournament {} ({} removed)",
        assignment.assignments.len(),
        assignment.number_of_groups,
        tournament_id,
        assignment.removed.len()
    );
    Ok(updated)
}

fn validate_assignment(
    assignment: &GroupAssignment,
    players: &[Player],
    limits: &SetupLimits,
) -> ServiceResult<()> {
    let mut errors = FieldErrors::new();
    let known: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();

    if !limits.groups.contains(&assignment.number_of_groups) {
        errors.add(
            "numberOfGroups",
            format!(
                "Number of groups must be between {} and {}",
                limits.groups.start(),
                limits.groups.end()
            ),
        );
    }

    for (&player_id, &group) in &assignment.assignments {
        let field = format!("player_{player_id}");
        if !known.contains(&player_id) {
            errors.add(&field, "Unknown player");
        } else if group < 1 || group > assignment.number_of_groups {
            errors.add(
                &field,
                format!("Group must be between 1 and {}", assignment.number_of_groups),
            );
        }
    }

    for &player_id in &assignment.removed {
        if !known.contains(&player_id) {
            errors.add(&format!("removed_{player_id}"), "Unknown player");
        }
    }

    errors.into_result()
}

/// Generates the round-robin draw, initializes standings and flags the
/// tournament as started, all in one transaction. Re-running it on a
/// started tournament creates nothing new.
pub fn start_tournament(
    conn: &mut Connection,
    tournament_id: TournamentId,
    limits: &SetupLimits,
) -> ServiceResult<StartSummary> {
    let tournament = load_tournament(conn, tournament_id)?;
    let player_count = database::players::count_by_tournament(conn, tournament_id)?;
    if !tournament.started && (player_count as usize) < limits.min_players_to_start {
        return Err(ServiceError::invalid(
            "players",
            format!("At least {} players are required to start", limits.min_players_to_start),
        ));
    }

    let tx = conn.transaction().context("Failed to open transaction")?;
    let summary = StartSummary {
        matches_created: generate_matches(&tx, tournament_id)?,
        standings_created: initialize_standings(&tx, tournament_id)?,
    };
    database::tournaments::mark_started(&tx, tournament_id)?;
    tx.commit().context("Failed to commit tournament start")?;

    info!(
        "Started tournament {}: {} matches, {} standings created",
        tournament_id, summary.matches_created, summary.standings_created
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Entity;
    use crate::services::testing::{memory_conn, seed_players, seed_tournament};

    fn assignment(
        number_of_groups: i64,
        pairs: &[(PlayerId, GroupNumber)],
        removed: &[PlayerId],
    ) -> GroupAssignment {
        GroupAssignment {
            number_of_groups,
            assignments: pairs.iter().copied().collect(),
            removed: removed.to_vec(),
        }
    }

    #[test]
    fn test_assign_groups_applies_removals_and_omissions() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let ids = seed_players(
            &conn,
            tid,
            &[("A", Some(1)), ("B", Some(1)), ("C", Some(1)), ("D", Some(1)), ("E", Some(1))],
        );

        let updated = assign_groups(
            &mut conn,
            tid,
            &assignment(3, &[(ids[0], 1), (ids[1], 2), (ids[2], 3)], &[ids[3]]),
            &SetupLimits::default(),
        )
        .unwrap();

        let groups: Vec<Option<i64>> = updated.iter().map(|p| p.group_number).collect();
        assert_eq!(groups, vec![Some(1), Some(2), Some(3), None, None]);
        assert_eq!(load_tournament(&conn, tid).unwrap().number_of_groups, 3);
    }

    #[test]
    fn test_assign_out_of_range_group_changes_nothing() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 2);
        let ids = seed_players(&conn, tid, &[("A", Some(1)), ("B", Some(2))]);

        let err = assign_groups(
            &mut conn,
            tid,
            &assignment(2, &[(ids[0], 2), (ids[1], 5)], &[]),
            &SetupLimits::default(),
        )
        .unwrap_err();

        let field = format!("player_{}", ids[1]);
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains(&field)));
        let players = database::players::list_by_tournament(&conn, tid).unwrap();
        assert_eq!(players[0].group_number, Some(1));
    }

    #[test]
    fn test_assign_unknown_player_is_rejected() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 2);
        seed_players(&conn, tid, &[("A", None)]);

        let limits = SetupLimits::default();
        let err = assign_groups(&mut conn, tid, &assignment(2, &[(404, 1)], &[]), &limits)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("player_404")));
    }

    #[test]
    fn test_start_generates_matches_and_standings_once() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 2);
        seed_players(
            &conn,
            tid,
            &[("A", Some(1)), ("B", Some(1)), ("C", Some(1)), ("D", Some(2)), ("E", Some(2))],
        );
        let limits = SetupLimits::default();

        let first = start_tournament(&mut conn, tid, &limits).unwrap();
        let second = start_tournament(&mut conn, tid, &limits).unwrap();

        assert_eq!(
            first,
            StartSummary {
                matches_created: 4,
                standings_created: 5
            }
        );
        assert_eq!(second, StartSummary::default());
        assert!(load_tournament(&conn, tid).unwrap().started);
    }

    #[test]
    fn test_start_requires_two_players() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        seed_players(&conn, tid, &[("Solo", None)]);

        let err = start_tournament(&mut conn, tid, &SetupLimits::default()).unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("players")));
        assert!(!load_tournament(&conn, tid).unwrap().started);
    }

    #[test]
    fn test_groups_are_frozen_after_start() {
        let (_pool, mut conn) = memory_conn();
        let tid = seed_tournament(&conn, 1);
        let ids = seed_players(&conn, tid, &[("A", Some(1)), ("B", Some(1))]);
        start_tournament(&mut conn, tid, &SetupLimits::default()).unwrap();

        let limits = SetupLimits::default();
        let err = assign_groups(&mut conn, tid, &assignment(2, &[(ids[0], 2)], &[]), &limits)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("tournament")));
    }

    #[test]
    fn test_start_unknown_tournament() {
        let (_pool, mut conn) = memory_conn();

        let err = start_tournament(&mut conn, 12, &SetupLimits::default()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: Entity::Tournament, id: 12 }));
    }
}
