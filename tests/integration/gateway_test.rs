//! Integration tests for the gateway layer: query assembly, row decoding
//! and the change-notification frame shapes. No live backend involved.

use std::time::Duration;
use tahfidz::gateway::types::{AttendanceRow, AttendanceStatus, PointsRow, SetoranWithStudent};
use tahfidz::gateway::{GatewayError, RealtimeClient, TableClient};

fn client() -> TableClient {
    TableClient::with_timeout("https://backend.test", "anon", Duration::from_secs(5))
}

#[test]
fn test_attendance_window_query() {
    let client = client();
    let query = client
        .from("attendance")
        .eq("student_id", "abc-123")
        .order("date", true)
        .limit(30);

    let params = query.params();
    assert!(params.contains(&("student_id".to_string(), "eq.abc-123".to_string())));
    assert!(params.contains(&("order".to_string(), "date.desc".to_string())));
    assert!(params.contains(&("limit".to_string(), "30".to_string())));
}

#[test]
fn test_range_query_is_inclusive_bounds() {
    let client = client();
    let query = client
        .from("attendance")
        .gte("date", "2025-04-01")
        .lte("date", "2025-04-30");

    let params = query.params();
    assert!(params.contains(&("date".to_string(), "gte.2025-04-01".to_string())));
    assert!(params.contains(&("date".to_string(), "lte.2025-04-30".to_string())));
}

#[test]
fn test_pending_review_query_with_embed() {
    let client = client();
    let query = client
        .from("setoran")
        .select("*,siswa:siswa_id(name)")
        .eq("organize_id", "org-1")
        .eq("status", "pending")
        .order("created_at", true)
        .limit(3);

    let params = query.params();
    assert_eq!(
        params[0],
        ("select".to_string(), "*,siswa:siswa_id(name)".to_string())
    );
    assert!(params.contains(&("status".to_string(), "eq.pending".to_string())));
}

/// An unroutable backend surfaces as a network error, the terminal
/// failure class for a fetch: no retries anywhere.
#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = TableClient::with_timeout("http://127.0.0.1:1", "anon", Duration::from_secs(2));
    let result = client.from("users").fetch::<AttendanceRow>().await;
    assert!(matches!(result, Err(GatewayError::Network(_))));
}

#[test]
fn test_joined_setoran_row_decodes_flattened() {
    let json = r#"{
        "id": "3b2e9a71-4e8e-4f91-9a7e-0a4bbd1f0001",
        "siswa_id": "3b2e9a71-4e8e-4f91-9a7e-0a4bbd1f0002",
        "organize_id": "3b2e9a71-4e8e-4f91-9a7e-0a4bbd1f0003",
        "jenis": "hafalan",
        "surah": "Al-Mulk",
        "juz": 29,
        "ayat_mulai": 1,
        "ayat_selesai": 10,
        "file_url": "https://media.test/mulk.mp3",
        "tanggal": "2025-05-02",
        "status": "pending",
        "poin": 0,
        "created_at": "2025-05-02T08:30:00Z",
        "siswa": {"name": "Ali Rahman"}
    }"#;

    let row: SetoranWithStudent = serde_json::from_str(json).unwrap();
    assert_eq!(row.setoran.surah, "Al-Mulk");
    assert_eq!(row.siswa.unwrap().name, "Ali Rahman");
}

#[test]
fn test_points_row_defaults_missing_fields() {
    // A sparse row decodes with zero points rather than failing
    let json = r#"{"siswa_id": "3b2e9a71-4e8e-4f91-9a7e-0a4bbd1f0002"}"#;
    let row: PointsRow = serde_json::from_str(json).unwrap();
    assert_eq!(row.total_poin, 0);
    assert_eq!(row.poin_hafalan, 0);
    assert_eq!(row.poin_quiz, 0);
}

#[test]
fn test_attendance_status_tags() {
    for (tag, status) in [
        ("hadir", AttendanceStatus::Present),
        ("izin", AttendanceStatus::Excused),
        ("tidak_hadir", AttendanceStatus::Absent),
    ] {
        let decoded: AttendanceStatus =
            serde_json::from_str(&format!("\"{}\"", tag)).unwrap();
        assert_eq!(decoded, status);
    }
}

#[test]
fn test_realtime_topics() {
    assert_eq!(
        RealtimeClient::endpoint_from_base("https://project.example.co"),
        "wss://project.example.co/realtime/v1/websocket"
    );
    let topic = RealtimeClient::topic_for("siswa_poin");
    assert_eq!(RealtimeClient::table_from_topic(&topic), Some("siswa_poin"));
    assert_eq!(RealtimeClient::table_from_topic("realtime:public:"), None);
}
