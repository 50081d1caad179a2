//! Setoran submission.
//!
//! Validation runs locally, before anything touches the gateway; only a
//! fully valid form produces an insert. The audio file is uploaded to the
//! media host by the caller and arrives here as a URL.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::gateway::types::SetoranKind;
use crate::gateway::{GatewayError, TableClient};

/// Unit numbers (juz) run 1-30.
pub const JUZ_RANGE: std::ops::RangeInclusive<u8> = 1..=30;

/// Raw form state of a new submission.
#[derive(Debug, Clone, Default)]
pub struct NewSetoran {
    pub kind: SetoranKind,
    pub surah: String,
    pub juz: String,
    pub ayat_start: String,
    pub ayat_end: String,
    pub file_url: String,
}

/// A validated submission ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSetoran {
    pub kind: SetoranKind,
    pub surah: String,
    pub juz: u8,
    pub ayat_start: Option<u16>,
    pub ayat_end: Option<u16>,
    pub file_url: String,
}

impl NewSetoran {
    /// Validate the form.
    ///
    /// Required: chapter name, unit number in [`JUZ_RANGE`], audio file.
    /// The verse range is optional but must be ordered when both ends are
    /// given.
    pub fn validate(&self) -> Result<ValidatedSetoran, SubmitError> {
        let surah = self.surah.trim();
        if surah.is_empty() || self.juz.trim().is_empty() || self.file_url.trim().is_empty() {
            return Err(SubmitError::MissingFields);
        }

        let juz: u8 = self
            .juz
            .trim()
            .parse()
            .map_err(|_| SubmitError::InvalidJuz(self.juz.trim().to_string()))?;
        if !JUZ_RANGE.contains(&juz) {
            return Err(SubmitError::InvalidJuz(juz.to_string()));
        }

        let ayat_start = parse_optional_verse(&self.ayat_start)?;
        let ayat_end = parse_optional_verse(&self.ayat_end)?;
        if let (Some(start), Some(end)) = (ayat_start, ayat_end) {
            if start > end {
                return Err(SubmitError::VerseRangeReversed { start, end });
            }
        }

        Ok(ValidatedSetoran {
            kind: self.kind,
            surah: surah.to_string(),
            juz,
            ayat_start,
            ayat_end,
            file_url: self.file_url.trim().to_string(),
        })
    }
}

fn parse_optional_verse(input: &str) -> Result<Option<u16>, SubmitError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| SubmitError::InvalidVerse(input.to_string()))
}

/// Wire shape of a setoran insert; status and points are assigned by the
/// backend and the reviewer flow.
#[derive(Debug, Serialize)]
struct SetoranInsert<'a> {
    siswa_id: Uuid,
    organize_id: Uuid,
    jenis: SetoranKind,
    surah: &'a str,
    juz: u8,
    ayat_mulai: Option<u16>,
    ayat_selesai: Option<u16>,
    file_url: &'a str,
    tanggal: NaiveDate,
}

/// Validate and insert a new submission dated today.
pub async fn submit(
    gateway: &TableClient,
    student_id: Uuid,
    organize_id: Option<Uuid>,
    form: &NewSetoran,
    today: NaiveDate,
) -> Result<(), SubmitError> {
    let validated = form.validate()?;
    let organize_id = organize_id.ok_or(SubmitError::NotInOrganization)?;

    let row = SetoranInsert {
        siswa_id: student_id,
        organize_id,
        jenis: validated.kind,
        surah: &validated.surah,
        juz: validated.juz,
        ayat_mulai: validated.ayat_start,
        ayat_selesai: validated.ayat_end,
        file_url: &validated.file_url,
        tanggal: today,
    };

    gateway.insert("setoran", &row).await?;
    tracing::info!(
        "Submitted {} setoran for juz {}",
        validated.kind.display_label(),
        validated.juz
    );
    Ok(())
}

/// Submission errors.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Chapter, juz and an audio file are required")]
    MissingFields,

    #[error("Juz must be a number between 1 and 30, got {0}")]
    InvalidJuz(String),

    #[error("Not a valid verse number: {0}")]
    InvalidVerse(String),

    #[error("Verse range is reversed: {start}-{end}")]
    VerseRangeReversed { start: u16, end: u16 },

    #[error("Join a class before submitting")]
    NotInOrganization,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewSetoran {
        NewSetoran {
            kind: SetoranKind::Hafalan,
            surah: "Al-Mulk".to_string(),
            juz: "29".to_string(),
            ayat_start: "1".to_string(),
            ayat_end: "10".to_string(),
            file_url: "https://media.test/rec.mp3".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let validated = form().validate().unwrap();
        assert_eq!(validated.surah, "Al-Mulk");
        assert_eq!(validated.juz, 29);
        assert_eq!(validated.ayat_start, Some(1));
        assert_eq!(validated.ayat_end, Some(10));
    }

    #[test]
    fn test_missing_fields() {
        let mut missing_surah = form();
        missing_surah.surah = "  ".to_string();
        assert!(matches!(missing_surah.validate(), Err(SubmitError::MissingFields)));

        let mut missing_file = form();
        missing_file.file_url.clear();
        assert!(matches!(missing_file.validate(), Err(SubmitError::MissingFields)));
    }

    #[test]
    fn test_juz_out_of_range() {
        let mut bad = form();
        bad.juz = "31".to_string();
        assert!(matches!(bad.validate(), Err(SubmitError::InvalidJuz(_))));

        bad.juz = "0".to_string();
        assert!(matches!(bad.validate(), Err(SubmitError::InvalidJuz(_))));

        bad.juz = "abc".to_string();
        assert!(matches!(bad.validate(), Err(SubmitError::InvalidJuz(_))));
    }

    #[test]
    fn test_verse_range_optional() {
        let mut open_ended = form();
        open_ended.ayat_start.clear();
        open_ended.ayat_end.clear();
        let validated = open_ended.validate().unwrap();
        assert_eq!(validated.ayat_start, None);
        assert_eq!(validated.ayat_end, None);
    }

    #[test]
    fn test_verse_range_reversed() {
        let mut reversed = form();
        reversed.ayat_start = "10".to_string();
        reversed.ayat_end = "3".to_string();
        assert!(matches!(
            reversed.validate(),
            Err(SubmitError::VerseRangeReversed { start: 10, end: 3 })
        ));
    }
}
