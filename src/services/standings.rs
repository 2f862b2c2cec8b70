use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::Context;
use log::{debug, info};
use rusqlite::Connection;

use super::tournaments::load_tournament;
use crate::database::{self, StandingWithPlayer};
use crate::engine::{self, DEFAULT_GROUP, GroupNumber, RankedStanding, TournamentId};
use crate::errors::ServiceResult;

#[derive(Debug, Clone)]
pub struct GroupStandings {
    pub group_number: GroupNumber,
    pub rows: Vec<StandingWithPlayer>,
}

/// Creates a standing row for every player that lacks one and gives
/// unranked rows a provisional rank by name within their group.
/// Returns the number of rows created.
pub fn initialize_standings(
    conn: &Connection,
    tournament_id: TournamentId,
) -> ServiceResult<usize> {
    load_tournament(conn, tournament_id)?;

    let players = database::players::list_by_tournament(conn, tournament_id)?;
    let mut created = 0;
    for player in &players {
        let group = player.group_number.unwrap_or(DEFAULT_GROUP);
        if database::standings::insert_if_absent(conn, tournament_id, player.id, group)? {
            created += 1;
        }
    }

    let rows = database::standings::list_by_tournament(conn, tournament_id)?;
    if rows.iter().any(|r| r.standing.rank.is_none()) {
        assign_provisional_ranks(conn, rows)?;
    }

    if created > 0 {
        info!("Initialized {} standing rows for tournament {}", created, tournament_id);
    }
    Ok(created)
}

fn assign_provisional_ranks(conn: &Connection, rows: Vec<StandingWithPlayer>) -> ServiceResult<()> {
    let mut by_group: BTreeMap<GroupNumber, Vec<StandingWithPlayer>> = BTreeMap::new();
    for row in rows {
        by_group.entry(row.standing.group_number).or_default().push(row);
    }

    for list in by_group.values_mut() {
        list.sort_by(|a, b| a.player_name.cmp(&b.player_name));
        for (idx, row) in list.iter().enumerate() {
            if row.standing.rank.is_none() {
                database::standings::set_rank(conn, row.standing.id, idx as i64 + 1)?;
            }
        }
    }
    Ok(())
}

/// Atomic wrapper around [`initialize_standings`].
pub fn ensure_standings(
    conn: &mut Connection,
    tournament_id: TournamentId,
) -> ServiceResult<usize> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    let created = initialize_standings(&tx, tournament_id)?;
    tx.commit().context("Failed to commit standings initialization")?;
    Ok(created)
}

/// Full recompute of one group from its played matches. Every standing row
/// of the group is rewritten, including players with no games.
pub fn recalculate_group(
    conn: &Connection,
    tournament_id: TournamentId,
    group_number: GroupNumber,
) -> ServiceResult<Vec<RankedStanding>> {
    load_tournament(conn, tournament_id)?;

    let played = database::matches::list_played_in_group(conn, tournament_id, group_number)?;
    let stats = engine::accumulate_stats(&played);
    let candidates = database::standings::list_group_candidates(conn, tournament_id, group_number)?;
    let ranked = engine::rank_standings(candidates, &stats);

    for row in &ranked {
        database::standings::save_ranked(conn, row)?;
    }

    debug!(
        "Recalculated group {} of tournament {}: {} played matches, {} standings",
        group_number,
        tournament_id,
        played.len(),
        ranked.len()
    );
    Ok(ranked)
}

/// Atomic wrapper around [`recalculate_group`].
pub fn recalculate_standings(
    conn: &mut Connection,
    tournament_id: TournamentId,
    group_number: GroupNumber,
) -> ServiceResult<Vec<RankedStanding>> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    let ranked = recalculate_group(&tx, tournament_id, group_number)?;
    tx.commit().context("Failed to commit standings")?;
    Ok(ranked)
}

/// Recomputes every group that has standing rows. Returns the group count.
pub fn recalculate_tournament(
    conn: &mut Connection,
    tournament_id: TournamentId,
) -> ServiceResult<usize> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    load_tournament(&tx, tournament_id)?;

    let groups = database::standings::list_groups(&tx, tournament_id)?;
    for &group in &groups {
        recalculate_group(&tx, tournament_id, group)?;
    }

    tx.commit().context("Failed to commit standings")?;
    info!("Recalculated {} groups for tournament {}", groups.len(), tournament_id);
    Ok(groups.len())
}

/// Standings per group, every configured group present, rows in display order.
/// Missing rows are only created once the tournament has started.
pub fn group_standings(
    conn: &mut Connection,
    tournament_id: TournamentId,
) -> ServiceResult<Vec<GroupStandings>> {
    let tournament = load_tournament(conn, tournament_id)?;
    if tournament.started {
        ensure_standings(conn, tournament_id)?;
    }

    let mut by_group: BTreeMap<GroupNumber, Vec<StandingWithPlayer>> =
        (1..=tournament.number_of_groups).map(|g| (g, Vec::new())).collect();
    for row in database::standings::list_by_tournament(conn, tournament_id)? {
        by_group.entry(row.standing.group_number).or_default().push(row);
    }

    Ok(by_group
        .into_iter()
        .map(|(group_number, mut rows)| {
            sort_standings(&mut rows);
            GroupStandings { group_number, rows }
        })
        .collect())
}

/// Ranked rows first by rank; unranked rows after them by the ranking order.
pub fn sort_standings(rows: &mut [StandingWithPlayer]) {
    rows.sort_by(|a, b| match (a.standing.rank, b.standing.rank) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .standing
            .points
            .cmp(&a.standing.points)
            .then_with(|| b.standing.diff.cmp(&a.standing.diff))
            .then_with(|| b.standing.wins.cmp(&a.standing.wins))
            .then_with(|| a.player_name.cmp(&b.player_name)),
    });
}
