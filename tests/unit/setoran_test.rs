//! Unit tests for setoran validation and aggregates.

use chrono::{NaiveDate, Utc};
use tahfidz::gateway::types::{SetoranKind, SetoranRow, SetoranStatus};
use tahfidz::setoran::submit::SubmitError;
use tahfidz::setoran::{NewSetoran, SetoranSummary};
use uuid::Uuid;

fn form() -> NewSetoran {
    NewSetoran {
        kind: SetoranKind::Hafalan,
        surah: "An-Naba".to_string(),
        juz: "30".to_string(),
        ayat_start: String::new(),
        ayat_end: String::new(),
        file_url: "https://media.test/naba.mp3".to_string(),
    }
}

fn record(kind: SetoranKind, status: SetoranStatus, poin: i64) -> SetoranRow {
    SetoranRow {
        id: Uuid::new_v4(),
        siswa_id: Uuid::new_v4(),
        organize_id: Uuid::new_v4(),
        jenis: kind,
        surah: "Al-Fatihah".to_string(),
        juz: 1,
        ayat_mulai: None,
        ayat_selesai: None,
        file_url: "https://media.test/audio.mp3".to_string(),
        tanggal: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        status,
        catatan: None,
        poin,
        created_at: Utc::now(),
    }
}

#[test]
fn test_valid_form_passes() {
    let validated = form().validate().unwrap();
    assert_eq!(validated.juz, 30);
    assert_eq!(validated.ayat_start, None);
}

/// Required-field checks block locally, never reaching the gateway.
#[test]
fn test_missing_required_fields() {
    for strip in ["surah", "juz", "file"] {
        let mut incomplete = form();
        match strip {
            "surah" => incomplete.surah.clear(),
            "juz" => incomplete.juz.clear(),
            _ => incomplete.file_url.clear(),
        }
        assert!(
            matches!(incomplete.validate(), Err(SubmitError::MissingFields)),
            "expected MissingFields when {} is absent",
            strip
        );
    }
}

#[test]
fn test_juz_bounds() {
    let mut edge = form();
    edge.juz = "1".to_string();
    assert!(edge.validate().is_ok());

    edge.juz = "30".to_string();
    assert!(edge.validate().is_ok());

    edge.juz = "0".to_string();
    assert!(matches!(edge.validate(), Err(SubmitError::InvalidJuz(_))));

    edge.juz = "31".to_string();
    assert!(matches!(edge.validate(), Err(SubmitError::InvalidJuz(_))));
}

#[test]
fn test_reversed_verse_range() {
    let mut reversed = form();
    reversed.ayat_start = "12".to_string();
    reversed.ayat_end = "4".to_string();
    assert!(matches!(
        reversed.validate(),
        Err(SubmitError::VerseRangeReversed { .. })
    ));
}

#[test]
fn test_summary_counts_partition_total() {
    let records = vec![
        record(SetoranKind::Hafalan, SetoranStatus::Accepted, 10),
        record(SetoranKind::Hafalan, SetoranStatus::Pending, 0),
        record(SetoranKind::Murojaah, SetoranStatus::Rejected, 0),
        record(SetoranKind::Murojaah, SetoranStatus::Accepted, 5),
        record(SetoranKind::Hafalan, SetoranStatus::Accepted, 8),
    ];
    let summary = SetoranSummary::from_records(&records);

    assert_eq!(summary.total, 5);
    assert_eq!(
        summary.pending + summary.accepted + summary.rejected,
        summary.total
    );
    assert_eq!(summary.total_points, 23);
    assert_eq!(summary.hafalan_accepted, 2);
    assert_eq!(summary.murojaah_accepted, 1);
}

#[test]
fn test_summary_empty() {
    assert_eq!(SetoranSummary::from_records(&[]), SetoranSummary::default());
}
