//! Attendance statistics.

use crate::gateway::types::{AttendanceRow, AttendanceStatus};

/// Summary statistics over a set of attendance records.
///
/// Every record carries exactly one status, so the three counts always sum
/// to `total_days`. Recomputed in full on every fetch; never maintained
/// incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    /// Number of recorded days
    pub total_days: usize,
    /// Days marked present
    pub present_count: usize,
    /// Days marked excused
    pub excused_count: usize,
    /// Days marked absent
    pub absent_count: usize,
    /// Present days as a rounded percentage of recorded days (0 when empty)
    pub percentage: u8,
}

impl AttendanceStats {
    /// Compute statistics from a set of records, in any order.
    pub fn from_records(records: &[AttendanceRow]) -> Self {
        let total_days = records.len();
        let present_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let excused_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Excused)
            .count();
        let absent_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();

        Self {
            total_days,
            present_count,
            excused_count,
            absent_count,
            percentage: percentage(present_count, total_days),
        }
    }
}

/// Rounded share of `part` in `total`, as a percentage in `[0, 100]`.
///
/// An empty total is a valid input and yields 0. Rounding is half-up on
/// the fractional result.
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
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

    #[test]
    fn test_empty_records() {
        let stats = AttendanceStats::from_records(&[]);
        assert_eq!(stats, AttendanceStats::default());
        assert_eq!(stats.percentage, 0);
    }

    #[test]
    fn test_counts_partition_total() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Present),
            record(3, AttendanceStatus::Absent),
            record(4, AttendanceStatus::Excused),
        ];
        let stats = AttendanceStats::from_records(&records);

        assert_eq!(stats.total_days, 4);
        assert_eq!(
            stats.present_count + stats.excused_count + stats.absent_count,
            stats.total_days
        );
        assert_eq!(stats.present_count, 2);
        assert_eq!(stats.percentage, 50);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1 of 3 = 33.33 -> 33; 2 of 3 = 66.67 -> 67
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        // 1 of 8 = 12.5 -> 13
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(0, 31), 0);
        assert_eq!(percentage(31, 31), 100);
        for present in 0..=31 {
            assert!(percentage(present, 31) <= 100);
        }
    }
}
