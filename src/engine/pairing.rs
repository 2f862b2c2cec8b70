use std::collections::BTreeMap;

use log::debug;

use super::types::{GroupNumber, Pairing, PlayerId, PlayerSlot};

/// Group used for players that have not been assigned anywhere yet.
pub const DEFAULT_GROUP: GroupNumber = 1;

/// Builds the full round-robin draw: every unordered pair of players that
/// share a group, lower id first. Output is ordered by group, then by pair.
pub fn round_robin_pairings(players: &[PlayerSlot]) -> Vec<Pairing> {
    let groups = group_player_ids(players);

    groups
        .into_iter()
        .flat_map(|(group_number, player_ids)| {
            let pairs = pairs_for_group(group_number, &player_ids);
            debug!(
                "Group {}: {} players, {} pairings",
                group_number,
                player_ids.len(),
                pairs.len()
            );
            pairs
        })
        .collect()
}

fn group_player_ids(players: &[PlayerSlot]) -> BTreeMap<GroupNumber, Vec<PlayerId>> {
    let mut groups: BTreeMap<GroupNumber, Vec<PlayerId>> = BTreeMap::new();
    for slot in players {
        let group = slot.group_number.unwrap_or(DEFAULT_GROUP);
        groups.entry(group).or_default().push(slot.player_id);
    }

    for ids in groups.values_mut() {
        ids.sort_unstable();
        ids.dedup();
    }
    groups
}

fn pairs_for_group(group_number: GroupNumber, sorted_ids: &[PlayerId]) -> Vec<Pairing> {
    let mut pairs = Vec::with_capacity(pair_count(sorted_ids.len()));
    for (i, &player1_id) in sorted_ids.iter().enumerate() {
        for &player2_id in &sorted_ids[i + 1..] {
            pairs.push(Pairing {
                group_number,
                player1_id,
                player2_id,
            });
        }
    }
    pairs
}

/// n·(n−1)/2
pub fn pair_count(group_size: usize) -> usize {
    group_size * group_size.saturating_sub(1) / 2
}
