//! End-to-end derivation over fixture rows: raw records through stats,
//! filters, ranking and export rendering, the same path the screens run
//! after a fetch.

use chrono::{NaiveDate, Utc};
use tahfidz::attendance::export::render_csv;
use tahfidz::attendance::roster::{filter_students, StatusFilter, StudentAttendance};
use tahfidz::attendance::AttendanceStats;
use tahfidz::gateway::types::{
    AttendanceExportRow, AttendanceRow, AttendanceStatus, StudentName,
};
use tahfidz::points::filter::filtered_view;
use tahfidz::points::rankings::rank_by_total;
use tahfidz::points::{LeaderboardEntry, LeaderboardSort};
use uuid::Uuid;

fn records_for(student_id: Uuid, statuses: &[AttendanceStatus]) -> Vec<AttendanceRow> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| AttendanceRow {
            id: Uuid::new_v4(),
            student_id,
            date: NaiveDate::from_ymd_opt(2025, 6, 20 - i as u32).unwrap(),
            status: *status,
            note: (*status == AttendanceStatus::Excused).then(|| "izin keluarga".to_string()),
            created_at: Utc::now(),
        })
        .collect()
}

fn summarize(name: &str, statuses: &[AttendanceStatus]) -> StudentAttendance {
    let id = Uuid::new_v4();
    let records = records_for(id, statuses);
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

/// The roster view derives per-student stats, filters them, and the
/// derived numbers stay consistent with the underlying records.
#[test]
fn test_roster_derivation_consistency() {
    let roster = vec![
        summarize(
            "Ali Rahman",
            &[
                AttendanceStatus::Present,
                AttendanceStatus::Present,
                AttendanceStatus::Excused,
                AttendanceStatus::Absent,
            ],
        ),
        summarize("Budi", &[AttendanceStatus::Present, AttendanceStatus::Present]),
        summarize("Citra", &[AttendanceStatus::Absent, AttendanceStatus::Absent]),
    ];

    for student in &roster {
        assert_eq!(
            student.stats.present_count + student.stats.excused_count + student.stats.absent_count,
            student.records.len()
        );
        assert!(student.stats.percentage <= 100);
    }

    // Ali: 2 of 4 present
    assert_eq!(roster[0].stats.percentage, 50);

    let absent = filter_students(&roster, "", StatusFilter::Absent);
    let names: Vec<&str> = absent.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ali Rahman", "Citra"]);

    let searched = filter_students(&roster, "ALI", StatusFilter::All);
    assert_eq!(searched.len(), 1);
}

/// Ranking and the screen-side view filters compose without disturbing
/// rank numbers.
#[test]
fn test_leaderboard_view_composition() {
    let board = rank_by_total(vec![
        LeaderboardEntry {
            student_id: Uuid::new_v4(),
            name: "Aisyah".to_string(),
            total_points: 120,
            memorization_points: 90,
            quiz_points: 30,
            rank: 0,
        },
        LeaderboardEntry {
            student_id: Uuid::new_v4(),
            name: "Ali Rahman".to_string(),
            total_points: 120,
            memorization_points: 60,
            quiz_points: 60,
            rank: 0,
        },
        LeaderboardEntry {
            student_id: Uuid::new_v4(),
            name: "Budi".to_string(),
            total_points: 80,
            memorization_points: 20,
            quiz_points: 60,
            rank: 0,
        },
    ]);

    // Name-ordered input, so the 120 tie resolves alphabetically
    assert_eq!(board[0].name, "Aisyah");
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].name, "Ali Rahman");
    assert_eq!(board[1].rank, 2);

    let view = filtered_view(&board, "ali", LeaderboardSort::Quiz);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Ali Rahman");
    assert_eq!(view[0].rank, 2);
}

/// Fetched records rendered into the export keep their display vocabulary
/// and escape embedded delimiters.
#[test]
fn test_records_to_export_rows() {
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Excused,
        AttendanceStatus::Absent,
    ];
    let records = records_for(Uuid::new_v4(), &statuses);

    let export_rows: Vec<AttendanceExportRow> = records
        .iter()
        .map(|record| AttendanceExportRow {
            date: record.date,
            status: record.status,
            note: record.note.clone(),
            student: Some(StudentName {
                name: "Putri, Dewi".to_string(),
            }),
        })
        .collect();

    let csv = render_csv(&export_rows);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 1 + records.len());
    assert_eq!(lines[0], "Date,StudentName,Status,Note");
    // Comma-carrying names are quoted on every row
    assert!(lines[1..].iter().all(|line| line.contains(r#""Putri, Dewi""#)));
    assert!(lines[2].ends_with("izin keluarga"));
}
