//! Unit tests for the attendance export.

use chrono::NaiveDate;
use tahfidz::attendance::export::{
    default_file_name, render_csv, save_csv, AttendanceExporter, DateRange, ExportError,
    CSV_HEADER,
};
use tahfidz::gateway::types::{AttendanceExportRow, AttendanceStatus, StudentName};
use tahfidz::gateway::TableClient;

fn row(day: u32, name: &str, status: AttendanceStatus, note: Option<&str>) -> AttendanceExportRow {
    AttendanceExportRow {
        date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
        status,
        note: note.map(str::to_string),
        student: Some(StudentName {
            name: name.to_string(),
        }),
    }
}

/// An empty bound is rejected before any network call: the gateway here
/// points at an unroutable address, so reaching it would surface as a
/// transfer error instead.
#[tokio::test]
async fn test_missing_bounds_rejected_before_network() {
    let exporter = AttendanceExporter::new(TableClient::new("http://127.0.0.1:1", "key"));

    let result = exporter.export_csv("", "2025-04-30").await;
    assert!(matches!(result, Err(ExportError::MissingDateRange)));

    let result = exporter.export_csv("2025-04-01", "").await;
    assert!(matches!(result, Err(ExportError::MissingDateRange)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transfer_error() {
    let exporter = AttendanceExporter::new(TableClient::new("http://127.0.0.1:1", "key"));
    let result = exporter.export_csv("2025-04-01", "2025-04-30").await;
    assert!(matches!(result, Err(ExportError::Transfer(_))));
}

#[test]
fn test_header_row() {
    let csv = render_csv(&[]);
    assert_eq!(csv, format!("{}\n", CSV_HEADER));
}

#[test]
fn test_status_display_vocabulary() {
    let rows = vec![
        row(1, "Ali", AttendanceStatus::Present, None),
        row(2, "Ali", AttendanceStatus::Excused, None),
        row(3, "Ali", AttendanceStatus::Absent, None),
    ];
    let csv = render_csv(&rows);
    assert!(csv.contains(",Hadir,"));
    assert!(csv.contains(",Izin,"));
    assert!(csv.contains(",Tidak Hadir,"));
}

/// A note carrying both the delimiter and a quote must be quote-escaped.
#[test]
fn test_note_with_comma_and_quote() {
    let rows = vec![row(
        5,
        "Budi",
        AttendanceStatus::Excused,
        Some(r#"sakit, kata "dokter" istirahat"#),
    )];
    let csv = render_csv(&rows);
    let line = csv.lines().nth(1).unwrap();
    assert_eq!(
        line,
        r#"2025-04-05,Budi,Izin,"sakit, kata ""dokter"" istirahat""#
    );
}

#[test]
fn test_missing_student_name_falls_back() {
    let rows = vec![AttendanceExportRow {
        date: NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
        status: AttendanceStatus::Present,
        note: None,
        student: None,
    }];
    let csv = render_csv(&rows);
    assert!(csv.contains(",Unknown,"));
}

#[test]
fn test_save_writes_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let range = DateRange::parse("2025-04-01", "2025-04-30").unwrap();
    let path = dir.path().join(default_file_name(range));

    let csv = render_csv(&[row(1, "Citra", AttendanceStatus::Present, Some("tepat waktu"))]);
    save_csv(&path, &csv).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, csv);
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("absensi_2025-04-01"));
}
