//! Unit tests for attendance statistics.

use chrono::{NaiveDate, Utc};
use tahfidz::attendance::stats::percentage;
use tahfidz::attendance::AttendanceStats;
use tahfidz::gateway::types::{AttendanceRow, AttendanceStatus};
use uuid::Uuid;

fn record(day: u32, status: AttendanceStatus) -> AttendanceRow {
    AttendanceRow {
        id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        status,
        note: None,
        created_at: Utc::now(),
    }
}

/// percentage(∅) = 0
#[test]
fn test_empty_input_is_valid_and_zero() {
    let stats = AttendanceStats::from_records(&[]);
    assert_eq!(stats.total_days, 0);
    assert_eq!(stats.percentage, 0);
}

/// [present, present, absent, excused] → total 4, present 2, 50%
#[test]
fn test_two_of_four_present_is_fifty_percent() {
    let records = vec![
        record(1, AttendanceStatus::Present),
        record(2, AttendanceStatus::Present),
        record(3, AttendanceStatus::Absent),
        record(4, AttendanceStatus::Excused),
    ];
    let stats = AttendanceStats::from_records(&records);

    assert_eq!(stats.total_days, 4);
    assert_eq!(stats.present_count, 2);
    assert_eq!(stats.percentage, 50);
}

/// Counts always partition the total.
#[test]
fn test_counts_sum_to_total() {
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Excused,
        AttendanceStatus::Absent,
        AttendanceStatus::Present,
        AttendanceStatus::Excused,
        AttendanceStatus::Absent,
    ];
    let records: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| record(i as u32 + 1, *status))
        .collect();

    let stats = AttendanceStats::from_records(&records);
    assert_eq!(
        stats.present_count + stats.excused_count + stats.absent_count,
        stats.total_days
    );
}

/// Percentage stays within [0, 100] for any mix.
#[test]
fn test_percentage_bounds() {
    for present in 0..=31usize {
        let result = percentage(present, 31);
        assert!(result <= 100);
    }
    assert_eq!(percentage(0, 31), 0);
    assert_eq!(percentage(31, 31), 100);
}

/// Standard round-half-up on the fractional result.
#[test]
fn test_percentage_rounding() {
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
    assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
}

/// Record order never changes the result.
#[test]
fn test_order_independence() {
    let mut records = vec![
        record(1, AttendanceStatus::Present),
        record(2, AttendanceStatus::Absent),
        record(3, AttendanceStatus::Excused),
        record(4, AttendanceStatus::Present),
    ];
    let forward = AttendanceStats::from_records(&records);
    records.reverse();
    let backward = AttendanceStats::from_records(&records);
    assert_eq!(forward, backward);
}
