use std::cmp::Ordering;
use std::collections::HashMap;

use log::warn;

use super::types::{PlayedMatch, PlayerId, PlayerStats, RankedStanding, StandingCandidate};

pub const POINTS_PER_WIN: i64 = 2;

/// Folds played matches into per-player games/wins/losses/differential.
/// Players that never appear in `matches` are simply absent from the map.
pub fn accumulate_stats(matches: &[PlayedMatch]) -> HashMap<PlayerId, PlayerStats> {
    let mut stats: HashMap<PlayerId, PlayerStats> = HashMap::new();

    for m in matches {
        let delta = m.score1.saturating_sub(m.score2);
        let outcome = m.score1.cmp(&m.score2);

        record_side(stats.entry(m.player1_id).or_default(), delta, outcome);
        record_side(
            stats.entry(m.player2_id).or_default(),
            delta.saturating_neg(),
            outcome.reverse(),
        );

        if outcome == Ordering::Equal {
            warn!(
                "Played match {} vs {} is a draw ({}:{}); counted without a winner",
                m.player1_id, m.player2_id, m.score1, m.score2
            );
        }
    }

    stats
}

fn record_side(stats: &mut PlayerStats, delta: i64, outcome: Ordering) {
    stats.games += 1;
    stats.diff = stats.diff.saturating_add(delta);
    match outcome {
        Ordering::Greater => stats.wins += 1,
        Ordering::Less => stats.losses += 1,
        Ordering::Equal => {}
    }
}

pub fn points_for(stats: &PlayerStats) -> i64 {
    stats.wins * POINTS_PER_WIN
}

/// Attaches stats to every candidate (zero when absent), sorts by
/// points desc, diff desc, wins desc, name asc and hands out ranks 1..=k.
pub fn rank_standings(
    candidates: Vec<StandingCandidate>,
    stats: &HashMap<PlayerId, PlayerStats>,
) -> Vec<RankedStanding> {
    let mut rows: Vec<RankedStanding> = candidates
        .into_iter()
        .map(|c| {
            let player_stats = stats.get(&c.player_id).copied().unwrap_or_default();
            RankedStanding {
                standing_id: c.standing_id,
                player_id: c.player_id,
                player_name: c.player_name,
                points: points_for(&player_stats),
                stats: player_stats,
                rank: 0,
            }
        })
        .collect();

    rows.sort_by(compare_for_ranking);

    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx as i64 + 1;
    }
    rows
}

pub fn compare_for_ranking(a: &RankedStanding, b: &RankedStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.stats.diff.cmp(&a.stats.diff))
        .then_with(|| b.stats.wins.cmp(&a.stats.wins))
        .then_with(|| a.player_name.cmp(&b.player_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn played(player1_id: PlayerId, player2_id: PlayerId, score1: i64, score2: i64) -> PlayedMatch {
        PlayedMatch {
            player1_id,
            player2_id,
            score1,
            score2,
        }
    }

    fn candidate(standing_id: i64, player_id: PlayerId, name: &str) -> StandingCandidate {
        StandingCandidate {
            standing_id,
            player_id,
            player_name: name.to_string(),
        }
    }

    #[test]
    fn test_alice_bob_cara_scenario() {
        // Alice = 1, Bob = 2, Cara = 3
        let matches = vec![played(1, 2, 11, 7), played(1, 3, 11, 5)];
        let stats = accumulate_stats(&matches);

        let ranked = rank_standings(
            vec![
                candidate(30, 3, "Cara"),
                candidate(20, 2, "Bob"),
                candidate(10, 1, "Alice"),
            ],
            &stats,
        );

        let names: Vec<&str> = ranked.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Cara"]);

        let alice = &ranked[0];
        assert_eq!(
            alice.stats,
            PlayerStats {
                games: 2,
                wins: 2,
                losses: 0,
                diff: 10
            }
        );
        assert_eq!(alice.points, 4);
        assert_eq!(alice.rank, 1);

        assert_eq!(ranked[1].stats.diff, -4);
        assert_eq!(ranked[1].points, 0);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].stats.diff, -6);
        assert_eq!(ranked[2].stats.losses, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_player_without_games_keeps_zero_row_and_trails() {
        let stats = accumulate_stats(&[played(1, 2, 3, 9)]);

        let ranked = rank_standings(
            vec![
                candidate(1, 1, "Ann"),
                candidate(2, 2, "Ben"),
                candidate(3, 3, "Aaron"),
            ],
            &stats,
        );

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].player_name, "Ben");
        // Aaron (0 games, diff 0) sits above Ann (diff -6)
        assert_eq!(ranked[1].player_name, "Aaron");
        assert_eq!(ranked[1].stats, PlayerStats::default());
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].player_name, "Ann");
    }

    #[test]
    fn test_identical_stats_fall_back_to_name() {
        let stats = accumulate_stats(&[played(1, 3, 5, 3), played(2, 4, 5, 3)]);

        let ranked = rank_standings(
            vec![
                candidate(1, 1, "Zed"),
                candidate(2, 2, "Amy"),
                candidate(3, 3, "x"),
                candidate(4, 4, "y"),
            ],
            &stats,
        );

        assert_eq!(ranked[0].player_name, "Amy");
        assert_eq!(ranked[1].player_name, "Zed");
        assert_eq!(ranked[2].player_name, "x");
        assert_eq!(ranked[3].player_name, "y");
    }

    #[test]
    fn test_compare_uses_wins_after_points_and_diff() {
        let row = |name: &str, wins: i64, losses: i64| RankedStanding {
            standing_id: 0,
            player_id: 0,
            player_name: name.to_string(),
            stats: PlayerStats {
                games: wins + losses,
                wins,
                losses,
                diff: 0,
            },
            points: 4,
            rank: 0,
        };

        assert_eq!(compare_for_ranking(&row("B", 3, 0), &row("A", 2, 0)), Ordering::Less);
        assert_eq!(compare_for_ranking(&row("A", 2, 1), &row("B", 2, 0)), Ordering::Less);
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        let ranked = rank_standings(
            vec![candidate(1, 1, "alice"), candidate(2, 2, "Bob")],
            &HashMap::new(),
        );

        // 'B' (0x42) sorts before 'a' (0x61)
        assert_eq!(ranked[0].player_name, "Bob");
        assert_eq!(ranked[1].player_name, "alice");
    }

    #[test]
    fn test_draw_counts_game_without_result() {
        let stats = accumulate_stats(&[played(1, 2, 4, 4)]);

        assert_eq!(stats[&1].games, 1);
        assert_eq!(stats[&1].wins + stats[&1].losses, 0);
        assert_eq!(stats[&2].diff, 0);
    }

    #[test]
    fn test_extreme_scores_saturate_differential() {
        let stats = accumulate_stats(&[played(1, 2, i64::MAX, 0), played(1, 3, i64::MAX, 0)]);

        assert_eq!(stats[&1].diff, i64::MAX);
        assert_eq!(stats[&1].wins, 2);
        assert_eq!(stats[&2].diff, -i64::MAX);

        let ranked = rank_standings(
            vec![candidate(1, 1, "A"), candidate(2, 2, "B"), candidate(3, 3, "C")],
            &stats,
        );
        assert_eq!(ranked[0].player_name, "A");
    }

    fn scored_match() -> impl Strategy<Value = PlayedMatch> {
        (1i64..9, 1i64..9, 0i64..30, 0i64..30)
            .prop_filter("distinct players, no draws", |(a, b, s1, s2)| a < b && s1 != s2)
            .prop_map(|(a, b, s1, s2)| played(a, b, s1, s2))
    }

    proptest! {
        #[test]
        fn prop_wins_and_losses_each_sum_to_match_count(
            matches in proptest::collection::vec(scored_match(), 0..40)
        ) {
            let stats = accumulate_stats(&matches);

            let wins: i64 = stats.values().map(|s| s.wins).sum();
            let losses: i64 = stats.values().map(|s| s.losses).sum();
            prop_assert_eq!(wins, matches.len() as i64);
            prop_assert_eq!(losses, matches.len() as i64);
            prop_assert_eq!(stats.values().map(|s| s.diff).sum::<i64>(), 0);
        }

        #[test]
        fn prop_diff_is_own_score_minus_opponent_score(
            matches in proptest::collection::vec(scored_match(), 0..40)
        ) {
            let stats = accumulate_stats(&matches);

            for (&player, s) in &stats {
                let expected: i64 = matches
                    .iter()
                    .map(|m| {
                        if m.player1_id == player {
                            m.score1 - m.score2
                        } else if m.player2_id == player {
                            m.score2 - m.score1
                        } else {
                            0
                        }
                    })
                    .sum();
                prop_assert_eq!(s.diff, expected);
            }
        }

        #[test]
        fn prop_ranks_are_dense_and_ordered(
            matches in proptest::collection::vec(scored_match(), 0..40),
            names in proptest::collection::vec("[A-Ca-c]{1,2}", 8)
        ) {
            let stats = accumulate_stats(&matches);
            let candidates: Vec<StandingCandidate> = names
                .iter()
                .enumerate()
                .map(|(idx, name)| candidate(idx as i64 + 100, idx as i64 + 1, name))
                .collect();

            let ranked = rank_standings(candidates, &stats);

            for (idx, row) in ranked.iter().enumerate() {
                prop_assert_eq!(row.rank, idx as i64 + 1);
            }
            for pair in ranked.windows(2) {
                prop_assert_ne!(compare_for_ranking(&pair[0], &pair[1]), Ordering::Greater);
            }
        }
    }
}
