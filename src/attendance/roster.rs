//! Class attendance roster.
//!
//! Builds per-student summaries for the teacher/parent recap view. The
//! backend exposes one query per student, so the roster fetch fans out one
//! request per row, bounded by [`FAN_OUT_LIMIT`] rather than issuing the
//! whole class at once.

use chrono::{Duration, NaiveDate};
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use super::stats::AttendanceStats;
use crate::gateway::types::{AttendanceRow, AttendanceStatus, UserRow};
use crate::gateway::{GatewayError, TableClient, FAN_OUT_LIMIT};

/// Records fetched per student (roughly one month window).
pub const HISTORY_WINDOW: usize = 30;

/// Days covered by the daily detail matrix.
pub const DETAIL_DAYS: usize = 7;

/// One student's attendance summary.
#[derive(Debug, Clone)]
pub struct StudentAttendance {
    pub id: Uuid,
    pub name: String,
    /// Records newest-first, at most [`HISTORY_WINDOW`]
    pub records: Vec<AttendanceRow>,
    pub stats: AttendanceStats,
    /// Most recent record, if any
    pub last: Option<AttendanceRow>,
}

/// Result of a roster fetch.
///
/// A failed per-student query does not abort the batch; the student is
/// kept with zero records and counted here so the screen can show a
/// non-blocking notice.
#[derive(Debug, Clone, Default)]
pub struct RosterFetch {
    pub students: Vec<StudentAttendance>,
    pub failed: usize,
}

/// A student's status on one calendar day.
#[derive(Debug, Clone)]
pub struct DailyStatus {
    pub id: Uuid,
    pub name: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// Whole-class statuses for one calendar day.
#[derive(Debug, Clone)]
pub struct DailyDetail {
    pub date: NaiveDate,
    pub students: Vec<DailyStatus>,
}

/// Categorical roster filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Show everyone
    #[default]
    All,
    /// Last record is present
    Present,
    /// Last record is excused
    Excused,
    /// Has at least one absence in the window
    Absent,
}

impl StatusFilter {
    pub fn display_label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Semua",
            StatusFilter::Present => "Hadir",
            StatusFilter::Excused => "Izin",
            StatusFilter::Absent => "Alpha",
        }
    }
}

/// Fetch one student's records, newest-first, limited to the window.
pub async fn fetch_student_records(
    gateway: &TableClient,
    student_id: Uuid,
) -> Result<Vec<AttendanceRow>, GatewayError> {
    gateway
        .from("attendance")
        .eq("student_id", student_id)
        .order("date", true)
        .limit(HISTORY_WINDOW)
        .fetch()
        .await
}

/// Fetch the organization's students, ordered by name.
pub async fn fetch_students(
    gateway: &TableClient,
    organize_id: Uuid,
) -> Result<Vec<UserRow>, GatewayError> {
    gateway
        .from("users")
        .select("id,name,role,organize_id")
        .eq("organize_id", organize_id)
        .eq("role", "siswa")
        .order("name", false)
        .fetch()
        .await
}

/// Fetch attendance summaries for every student of an organization.
pub async fn fetch_class_attendance(
    gateway: &TableClient,
    organize_id: Uuid,
) -> Result<RosterFetch, GatewayError> {
    let students = fetch_students(gateway, organize_id).await?;
    tracing::debug!("Fetching attendance for {} students", students.len());

    let results = stream::iter(students)
        .map(|student| {
            let gateway = gateway.clone();
            async move {
                let records = fetch_student_records(&gateway, student.id).await;
                (student, records)
            }
        })
        .buffered(FAN_OUT_LIMIT)
        .collect::<Vec<_>>()
        .await;

    let mut fetch = RosterFetch::default();
    for (student, records) in results {
        let records = match records {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Attendance fetch failed for {}: {}", student.name, e);
                fetch.failed += 1;
                Vec::new()
            }
        };

        let stats = AttendanceStats::from_records(&records);
        let last = records.first().cloned();
        fetch.students.push(StudentAttendance {
            id: student.id,
            name: student.name,
            records,
            stats,
            last,
        });
    }

    Ok(fetch)
}

/// Fetch the per-day status matrix for the last [`DETAIL_DAYS`] days.
///
/// A day without a record defaults to absent with no note; a failed lookup
/// is treated the same way.
pub async fn fetch_daily_details(
    gateway: &TableClient,
    students: &[StudentAttendance],
    today: NaiveDate,
) -> Vec<DailyDetail> {
    let mut details = Vec::with_capacity(DETAIL_DAYS);

    for offset in 0..DETAIL_DAYS {
        let date = today - Duration::days(offset as i64);

        let student_entries: Vec<(Uuid, String)> =
            students.iter().map(|s| (s.id, s.name.clone())).collect();
        let statuses = stream::iter(student_entries)
            .map(|(id, name)| {
                let gateway = gateway.clone();
                async move {
                    let row = gateway
                        .from("attendance")
                        .eq("student_id", id)
                        .eq("date", date.format("%Y-%m-%d"))
                        .fetch_one::<AttendanceRow>()
                        .await;

                    match row {
                        Ok(Some(row)) => DailyStatus {
                            id,
                            name,
                            status: row.status,
                            note: row.note,
                        },
                        Ok(None) => DailyStatus {
                            id,
                            name,
                            status: AttendanceStatus::Absent,
                            note: None,
                        },
                        Err(e) => {
                            tracing::warn!("Daily lookup failed for {}: {}", name, e);
                            DailyStatus {
                                id,
                                name,
                                status: AttendanceStatus::Absent,
                                note: None,
                            }
                        }
                    }
                }
            })
            .buffered(FAN_OUT_LIMIT)
            .collect::<Vec<_>>()
            .await;

        details.push(DailyDetail { date, students: statuses });
    }

    details
}

/// Apply the name search and the categorical filter together.
///
/// Both are recomputed from the full roster on any input change; an empty
/// query leaves the roster untouched.
pub fn filter_students(
    students: &[StudentAttendance],
    query: &str,
    filter: StatusFilter,
) -> Vec<StudentAttendance> {
    let query = query.trim().to_lowercase();

    students
        .iter()
        .filter(|student| {
            let matches_search =
                query.is_empty() || student.name.to_lowercase().contains(&query);

            let matches_filter = match filter {
                StatusFilter::All => true,
                StatusFilter::Absent => student.stats.absent_count > 0,
                StatusFilter::Present => {
                    matches!(&student.last, Some(r) if r.status == AttendanceStatus::Present)
                }
                StatusFilter::Excused => {
                    matches!(&student.last, Some(r) if r.status == AttendanceStatus::Excused)
                }
            };

            matches_search && matches_filter
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(name: &str, statuses: &[AttendanceStatus]) -> StudentAttendance {
        let id = Uuid::new_v4();
        let records: Vec<AttendanceRow> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| AttendanceRow {
                id: Uuid::new_v4(),
                student_id: id,
                date: NaiveDate::from_ymd_opt(2025, 3, 20 - i as u32).unwrap(),
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

    #[test]
    fn test_search_is_case_insensitive() {
        let roster = vec![
            student("Ali Rahman", &[AttendanceStatus::Present]),
            student("Budi", &[AttendanceStatus::Present]),
        ];
        let filtered = filter_students(&roster, "ali", StatusFilter::All);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ali Rahman");
    }

    #[test]
    fn test_search_is_idempotent() {
        let roster = vec![
            student("Ali Rahman", &[AttendanceStatus::Present]),
            student("Salim", &[AttendanceStatus::Excused]),
        ];
        let once = filter_students(&roster, "ali", StatusFilter::All);
        let twice = filter_students(&once, "ali", StatusFilter::All);
        assert_eq!(once.len(), twice.len());
        assert!(once
            .iter()
            .zip(twice.iter())
            .all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_empty_query_returns_all() {
        let roster = vec![
            student("Ali", &[AttendanceStatus::Present]),
            student("Budi", &[AttendanceStatus::Absent]),
        ];
        assert_eq!(filter_students(&roster, "  ", StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_absent_filter_uses_count() {
        let roster = vec![
            student("Ali", &[AttendanceStatus::Present, AttendanceStatus::Absent]),
            student("Budi", &[AttendanceStatus::Present]),
        ];
        let filtered = filter_students(&roster, "", StatusFilter::Absent);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ali");
    }

    #[test]
    fn test_status_filter_uses_last_record() {
        let roster = vec![
            student("Ali", &[AttendanceStatus::Excused, AttendanceStatus::Present]),
            student("Budi", &[AttendanceStatus::Present]),
        ];
        let filtered = filter_students(&roster, "", StatusFilter::Excused);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ali");
    }

    #[test]
    fn test_filters_combine() {
        let roster = vec![
            student("Ali", &[AttendanceStatus::Present]),
            student("Aliyah", &[AttendanceStatus::Excused]),
        ];
        let filtered = filter_students(&roster, "ali", StatusFilter::Present);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ali");
    }
}
