//! Row types for the hosted tables, as consumed by the client.
//!
//! The backend schema keeps its Indonesian value tags on the wire
//! (`hadir`, `hafalan`, `diterima`, ...); the enums here carry those tags
//! via serde renames and expose display labels for the UI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student
    Siswa,
    /// Teacher
    Guru,
    /// Parent
    Ortu,
    /// Administrator
    Admin,
}

impl Role {
    /// Honorific shown in the dashboard greeting.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Siswa => "Santri",
            Role::Guru => "Ustadz/Ustadzah",
            Role::Ortu => "Wali Santri",
            Role::Admin => "Administrator",
        }
    }
}

/// Attendance status per student per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Present
    #[serde(rename = "hadir")]
    Present,
    /// Excused absence
    #[serde(rename = "izin")]
    Excused,
    /// Absent without excuse
    #[serde(rename = "tidak_hadir")]
    Absent,
}

impl AttendanceStatus {
    /// Fixed 3-value display vocabulary, also used by the CSV export.
    pub fn display_label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Hadir",
            AttendanceStatus::Excused => "Izin",
            AttendanceStatus::Absent => "Tidak Hadir",
        }
    }
}

/// Kind of a setoran submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetoranKind {
    /// New memorization
    #[default]
    Hafalan,
    /// Review of earlier memorization
    Murojaah,
}

impl SetoranKind {
    pub fn display_label(&self) -> &'static str {
        match self {
            SetoranKind::Hafalan => "Hafalan",
            SetoranKind::Murojaah => "Murojaah",
        }
    }
}

/// Review status of a setoran submission, assigned by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetoranStatus {
    /// Waiting for review
    #[serde(rename = "pending")]
    Pending,
    /// Accepted
    #[serde(rename = "diterima")]
    Accepted,
    /// Rejected
    #[serde(rename = "ditolak")]
    Rejected,
}

impl SetoranStatus {
    pub fn display_label(&self) -> &'static str {
        match self {
            SetoranStatus::Pending => "Menunggu Penilaian",
            SetoranStatus::Accepted => "Diterima",
            SetoranStatus::Rejected => "Ditolak",
        }
    }
}

/// Row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub organize_id: Option<Uuid>,
}

/// The signed-in user, derived from their `users` row.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub organize_id: Option<Uuid>,
}

impl From<UserRow> for Profile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: row.role,
            organize_id: row.organize_id,
        }
    }
}

/// Row of the `attendance` table. One row per (student, date) pair;
/// uniqueness is enforced by the backend, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Embedded student identity on joined attendance rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentName {
    pub name: String,
}

/// Attendance row joined with the student's name, for the export query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceExportRow {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub student: Option<StudentName>,
}

/// Row of the `setoran` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetoranRow {
    pub id: Uuid,
    pub siswa_id: Uuid,
    pub organize_id: Uuid,
    pub jenis: SetoranKind,
    pub surah: String,
    pub juz: u8,
    #[serde(default)]
    pub ayat_mulai: Option<u16>,
    #[serde(default)]
    pub ayat_selesai: Option<u16>,
    pub file_url: String,
    pub tanggal: NaiveDate,
    pub status: SetoranStatus,
    #[serde(default)]
    pub catatan: Option<String>,
    #[serde(default)]
    pub poin: i64,
    pub created_at: DateTime<Utc>,
}

impl SetoranRow {
    /// "Al-Fatihah 1-7" style range label, or just the chapter name.
    pub fn range_label(&self) -> String {
        match (self.ayat_mulai, self.ayat_selesai) {
            (Some(start), Some(end)) => format!("{} {}-{}", self.surah, start, end),
            (Some(start), None) => format!("{} {}", self.surah, start),
            _ => self.surah.clone(),
        }
    }
}

/// Setoran row joined with the submitting student's name, for review lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetoranWithStudent {
    #[serde(flatten)]
    pub setoran: SetoranRow,
    #[serde(default)]
    pub siswa: Option<StudentName>,
}

/// Row of the `siswa_poin` table. One row per student, mutated by the
/// reviewer flow outside this codebase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsRow {
    pub siswa_id: Uuid,
    #[serde(default)]
    pub total_poin: i64,
    #[serde(default)]
    pub poin_hafalan: i64,
    #[serde(default)]
    pub poin_quiz: i64,
}

/// Row of the `organizes` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeRow {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

/// Row of the `labels` table (achievement labels awarded to a student).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRow {
    pub id: Uuid,
    pub siswa_id: Uuid,
    pub label: String,
}
