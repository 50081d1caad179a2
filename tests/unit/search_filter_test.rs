//! Unit tests for search and filter predicates.

use chrono::{NaiveDate, Utc};
use tahfidz::attendance::roster::{filter_students, StatusFilter, StudentAttendance};
use tahfidz::attendance::AttendanceStats;
use tahfidz::gateway::types::{AttendanceRow, AttendanceStatus};
use tahfidz::points::filter::{filtered_view, search_by_name, LeaderboardSort};
use tahfidz::points::rankings::rank_by_total;
use tahfidz::points::LeaderboardEntry;
use uuid::Uuid;

fn board_entry(name: &str, total: i64, hafalan: i64, quiz: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        student_id: Uuid::new_v4(),
        name: name.to_string(),
        total_points: total,
        memorization_points: hafalan,
        quiz_points: quiz,
        rank: 0,
    }
}

fn student(name: &str, statuses: &[AttendanceStatus]) -> StudentAttendance {
    let id = Uuid::new_v4();
    let records: Vec<AttendanceRow> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| AttendanceRow {
            id: Uuid::new_v4(),
            student_id: id,
            date: NaiveDate::from_ymd_opt(2025, 3, 25 - i as u32).unwrap(),
            status: *status,
            note: None,
            created_at: Utc::now(),
        })
        .collect();

    let stats = AttendanceStats::from_records(&records);
    let last = records.first().cloned();
    StudentAttendance {
        id,
        name: name.to_string(),
        records,
        stats,
        last,
    }
}

/// Query "ali" matches "Ali Rahman".
#[test]
fn test_search_is_case_insensitive() {
    let board = rank_by_total(vec![
        board_entry("Ali Rahman", 50, 25, 25),
        board_entry("Budi", 40, 20, 20),
    ]);

    let found = search_by_name(&board, "ali");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ali Rahman");
}

/// Filtering an already-filtered collection again yields the same result.
#[test]
fn test_search_is_idempotent() {
    let board = rank_by_total(vec![
        board_entry("Ali Rahman", 50, 25, 25),
        board_entry("Aisyah", 45, 30, 15),
        board_entry("Budi", 40, 20, 20),
    ]);

    let once = search_by_name(&board, "a");
    let twice = search_by_name(&once, "a");
    assert_eq!(once, twice);
}

/// An empty query returns the collection unmodified.
#[test]
fn test_empty_query_is_identity() {
    let board = rank_by_total(vec![
        board_entry("Ali", 50, 25, 25),
        board_entry("Budi", 40, 20, 20),
    ]);
    assert_eq!(search_by_name(&board, ""), board);
    assert_eq!(search_by_name(&board, "   "), board);
}

/// The category chip reorders the view without re-ranking.
#[test]
fn test_category_sort_keeps_overall_ranks() {
    let board = rank_by_total(vec![
        board_entry("Ali", 100, 80, 20),
        board_entry("Budi", 90, 30, 60),
    ]);

    let view = filtered_view(&board, "", LeaderboardSort::Quiz);
    assert_eq!(view[0].name, "Budi");
    assert_eq!(view[0].rank, 2);
    assert_eq!(view[1].name, "Ali");
    assert_eq!(view[1].rank, 1);
}

/// Search and category filters combine (AND semantics).
#[test]
fn test_roster_filters_combine() {
    let roster = vec![
        student("Ali", &[AttendanceStatus::Present]),
        student("Aliyah", &[AttendanceStatus::Excused]),
        student("Budi", &[AttendanceStatus::Present]),
    ];

    let filtered = filter_students(&roster, "ali", StatusFilter::Present);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Ali");
}

/// The absent chip selects anyone with an absence in the window, not just
/// those absent most recently.
#[test]
fn test_absent_filter_counts_window() {
    let roster = vec![
        student(
            "Ali",
            &[AttendanceStatus::Present, AttendanceStatus::Absent],
        ),
        student("Budi", &[AttendanceStatus::Present]),
    ];

    let filtered = filter_students(&roster, "", StatusFilter::Absent);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Ali");
}

/// Present/excused chips match the most recent record.
#[test]
fn test_status_filter_uses_last_record() {
    let roster = vec![
        student(
            "Ali",
            &[AttendanceStatus::Excused, AttendanceStatus::Present],
        ),
        student("Budi", &[AttendanceStatus::Present]),
    ];

    let excused = filter_students(&roster, "", StatusFilter::Excused);
    assert_eq!(excused.len(), 1);
    assert_eq!(excused[0].name, "Ali");

    let present = filter_students(&roster, "", StatusFilter::Present);
    assert_eq!(present.len(), 1);
    assert_eq!(present[0].name, "Budi");
}
