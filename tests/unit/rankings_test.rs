//! Unit tests for leaderboard ranking.

use tahfidz::points::rankings::{entry_for, leader_by, rank_by_total, PointCategory};
use tahfidz::points::LeaderboardEntry;
use uuid::Uuid;

fn entry(name: &str, total: i64, hafalan: i64, quiz: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        student_id: Uuid::new_v4(),
        name: name.to_string(),
        total_points: total,
        memorization_points: hafalan,
        quiz_points: quiz,
        rank: 0,
    }
}

/// Ranks are a bijection onto [1..N].
#[test]
fn test_ranks_are_a_bijection() {
    let ranked = rank_by_total(vec![
        entry("A", 10, 5, 5),
        entry("B", 40, 20, 20),
        entry("C", 25, 10, 15),
        entry("D", 40, 30, 10),
        entry("E", 0, 0, 0),
    ]);

    let mut ranks: Vec<u32> = ranked.iter().map(|e| e.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

/// Rank 1 holds the maximum total.
#[test]
fn test_rank_one_has_maximum() {
    let ranked = rank_by_total(vec![
        entry("A", 12, 0, 0),
        entry("B", 90, 0, 0),
        entry("C", 45, 0, 0),
    ]);

    let max = ranked.iter().map(|e| e.total_points).max().unwrap();
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[0].total_points, max);
}

/// [{A,100},{B,80},{C,100}] stably ranked → A:1, C:2, B:3.
///
/// The sort is stable and the fetch feeds entries in name order, so equal
/// totals rank in input (alphabetical) order.
#[test]
fn test_tie_break_preserves_input_order() {
    let ranked = rank_by_total(vec![
        entry("A", 100, 0, 0),
        entry("B", 80, 0, 0),
        entry("C", 100, 0, 0),
    ]);

    let order: Vec<(&str, u32)> = ranked.iter().map(|e| (e.name.as_str(), e.rank)).collect();
    assert_eq!(order, vec![("A", 1), ("C", 2), ("B", 3)]);
}

/// Rankings are recomputed from scratch; ranks carried in are ignored.
#[test]
fn test_stale_ranks_are_overwritten() {
    let mut stale = entry("A", 10, 0, 0);
    stale.rank = 7;
    let ranked = rank_by_total(vec![stale, entry("B", 20, 0, 0)]);

    assert_eq!(ranked[0].name, "B");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn test_entry_for_finds_own_rank() {
    let ranked = rank_by_total(vec![entry("Ali", 30, 20, 10), entry("Budi", 50, 25, 25)]);
    let ali = ranked.iter().find(|e| e.name == "Ali").unwrap();

    let found = entry_for(&ranked, ali.student_id).unwrap();
    assert_eq!(found.rank, 2);
    assert!(entry_for(&ranked, Uuid::new_v4()).is_none());
}

#[test]
fn test_category_leaders() {
    let entries = vec![
        entry("Ali", 100, 70, 30),
        entry("Budi", 110, 40, 70),
        entry("Citra", 90, 70, 20),
    ];

    // First-on-tie: Ali and Citra share the hafalan maximum
    assert_eq!(
        leader_by(&entries, PointCategory::Memorization).unwrap().name,
        "Ali"
    );
    assert_eq!(leader_by(&entries, PointCategory::Quiz).unwrap().name, "Budi");
}
