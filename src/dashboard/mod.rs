//! Role dashboards.
//!
//! Each role sees a different summary on the home screen; all of them are
//! plain fetch-and-aggregate over the hosted tables, recomputed in full on
//! every refresh.

use chrono::{Duration, NaiveDate};
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::attendance::roster::fetch_students;
use crate::gateway::types::{
    AttendanceRow, AttendanceStatus, PointsRow, Profile, Role, SetoranRow, SetoranWithStudent,
};
use crate::gateway::{GatewayError, TableClient, FAN_OUT_LIMIT};
use crate::setoran::{fetch_my_setoran, fetch_pending_with_names, SetoranSummary};

/// Entries shown in the recent-activity list.
pub const RECENT_ACTIVITY: usize = 3;

/// Window of the parent attendance overview, in days.
pub const PARENT_WINDOW_DAYS: i64 = 30;

/// Dashboard data, shaped per role.
#[derive(Debug, Clone)]
pub enum DashboardStats {
    Student(StudentDashboard),
    Teacher(TeacherDashboard),
    Parent(ParentDashboard),
    Admin(AdminDashboard),
    /// The profile has not joined an organization yet.
    NotJoined,
}

/// Student dashboard.
#[derive(Debug, Clone)]
pub struct StudentDashboard {
    pub summary: SetoranSummary,
    pub total_points: i64,
    pub label_count: u64,
    /// Most recent submissions, newest-first
    pub recent: Vec<SetoranRow>,
}

/// Today's attendance partition across the roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodayAttendance {
    pub total_students: usize,
    pub present: usize,
    pub excused: usize,
    pub absent: usize,
}

/// Teacher dashboard.
#[derive(Debug, Clone)]
pub struct TeacherDashboard {
    pub pending_setoran: u64,
    pub student_count: u64,
    pub today: TodayAttendance,
    pub recent_pending: Vec<SetoranWithStudent>,
}

/// One child's overview on the parent dashboard.
#[derive(Debug, Clone)]
pub struct ChildOverview {
    pub name: String,
    pub summary: SetoranSummary,
    pub total_points: i64,
    pub recent: Vec<SetoranRow>,
    /// Present days within the window
    pub present_days: usize,
    /// Recorded days within the window
    pub recorded_days: usize,
}

/// Parent dashboard.
#[derive(Debug, Clone)]
pub struct ParentDashboard {
    pub child: Option<ChildOverview>,
}

/// Admin dashboard.
#[derive(Debug, Clone, Copy)]
pub struct AdminDashboard {
    pub user_count: u64,
    pub organize_count: u64,
}

/// Fetch the dashboard for a profile.
pub async fn fetch_dashboard(
    gateway: &TableClient,
    profile: &Profile,
    today: NaiveDate,
) -> Result<DashboardStats, GatewayError> {
    match profile.role {
        Role::Siswa => fetch_student_dashboard(gateway, profile.id)
            .await
            .map(DashboardStats::Student),
        Role::Guru => match profile.organize_id {
            Some(organize_id) => fetch_teacher_dashboard(gateway, organize_id, today)
                .await
                .map(DashboardStats::Teacher),
            None => Ok(DashboardStats::NotJoined),
        },
        Role::Ortu => match profile.organize_id {
            Some(organize_id) => fetch_parent_dashboard(gateway, organize_id, today)
                .await
                .map(DashboardStats::Parent),
            None => Ok(DashboardStats::NotJoined),
        },
        Role::Admin => fetch_admin_dashboard(gateway)
            .await
            .map(DashboardStats::Admin),
    }
}

/// Student view: own points, submissions and labels.
pub async fn fetch_student_dashboard(
    gateway: &TableClient,
    student_id: Uuid,
) -> Result<StudentDashboard, GatewayError> {
    let points = gateway
        .from("siswa_poin")
        .eq("siswa_id", student_id)
        .fetch_one::<PointsRow>()
        .await?;

    let records = fetch_my_setoran(gateway, student_id).await?;

    let label_count = gateway
        .from("labels")
        .eq("siswa_id", student_id)
        .count()
        .await?;

    let summary = SetoranSummary::from_records(&records);
    let recent = records.into_iter().take(RECENT_ACTIVITY).collect();

    Ok(StudentDashboard {
        summary,
        total_points: points.map(|p| p.total_poin).unwrap_or(0),
        label_count,
        recent,
    })
}

/// Teacher view: review queue, roster size, today's attendance.
pub async fn fetch_teacher_dashboard(
    gateway: &TableClient,
    organize_id: Uuid,
    today: NaiveDate,
) -> Result<TeacherDashboard, GatewayError> {
    let pending_setoran = gateway
        .from("setoran")
        .eq("organize_id", organize_id)
        .eq("status", "pending")
        .count()
        .await?;

    let student_count = gateway
        .from("users")
        .eq("organize_id", organize_id)
        .eq("role", "siswa")
        .count()
        .await?;

    let today_stats = fetch_today_attendance(gateway, organize_id, today).await?;

    let recent_pending = fetch_pending_with_names(gateway, organize_id, RECENT_ACTIVITY).await?;

    Ok(TeacherDashboard {
        pending_setoran,
        student_count,
        today: today_stats,
        recent_pending,
    })
}

/// Partition today's attendance across the roster.
///
/// A student without a record today counts as absent, and so does a
/// failed lookup (missing data defaults to absent).
async fn fetch_today_attendance(
    gateway: &TableClient,
    organize_id: Uuid,
    today: NaiveDate,
) -> Result<TodayAttendance, GatewayError> {
    let students = fetch_students(gateway, organize_id).await?;

    let student_ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();
    let statuses = stream::iter(student_ids)
        .map(|student_id| {
            let gateway = gateway.clone();
            async move {
                gateway
                    .from("attendance")
                    .eq("student_id", student_id)
                    .eq("date", today.format("%Y-%m-%d"))
                    .fetch_one::<AttendanceRow>()
                    .await
            }
        })
        .buffered(FAN_OUT_LIMIT)
        .collect::<Vec<_>>()
        .await;

    let mut today_stats = TodayAttendance {
        total_students: students.len(),
        ..TodayAttendance::default()
    };

    for status in statuses {
        match status {
            Ok(Some(row)) => match row.status {
                AttendanceStatus::Present => today_stats.present += 1,
                AttendanceStatus::Excused => today_stats.excused += 1,
                AttendanceStatus::Absent => today_stats.absent += 1,
            },
            Ok(None) => today_stats.absent += 1,
            Err(e) => {
                tracing::warn!("Today's attendance lookup failed: {}", e);
                today_stats.absent += 1;
            }
        }
    }

    Ok(today_stats)
}

/// Parent view: the first child in the organization.
pub async fn fetch_parent_dashboard(
    gateway: &TableClient,
    organize_id: Uuid,
    today: NaiveDate,
) -> Result<ParentDashboard, GatewayError> {
    let children = fetch_students(gateway, organize_id).await?;
    let child = match children.into_iter().next() {
        Some(child) => child,
        None => return Ok(ParentDashboard { child: None }),
    };

    let records = fetch_my_setoran(gateway, child.id).await?;
    let summary = SetoranSummary::from_records(&records);
    let recent = records.into_iter().take(RECENT_ACTIVITY).collect();

    let points = gateway
        .from("siswa_poin")
        .eq("siswa_id", child.id)
        .fetch_one::<PointsRow>()
        .await?;

    let window_start = today - Duration::days(PARENT_WINDOW_DAYS);
    let attendance: Vec<AttendanceRow> = gateway
        .from("attendance")
        .eq("student_id", child.id)
        .gte("date", window_start.format("%Y-%m-%d"))
        .fetch()
        .await?;

    let present_days = attendance
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();

    Ok(ParentDashboard {
        child: Some(ChildOverview {
            name: child.name,
            summary,
            total_points: points.map(|p| p.total_poin).unwrap_or(0),
            recent,
            present_days,
            recorded_days: attendance.len(),
        }),
    })
}

/// Admin view: global counts.
pub async fn fetch_admin_dashboard(gateway: &TableClient) -> Result<AdminDashboard, GatewayError> {
    let user_count = gateway.from("users").count().await?;
    let organize_count = gateway.from("organizes").count().await?;

    Ok(AdminDashboard {
        user_count,
        organize_count,
    })
}

/// Greeting for the dashboard header, by local hour.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Selamat Pagi",
        12..=14 => "Selamat Siang",
        15..=17 => "Selamat Sore",
        _ => "Selamat Malam",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(0), "Selamat Pagi");
        assert_eq!(greeting(11), "Selamat Pagi");
        assert_eq!(greeting(12), "Selamat Siang");
        assert_eq!(greeting(15), "Selamat Sore");
        assert_eq!(greeting(18), "Selamat Malam");
        assert_eq!(greeting(23), "Selamat Malam");
    }
}
