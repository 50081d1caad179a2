//! Attendance export.
//!
//! Serializes a date range of attendance records, joined with student
//! names, to a delimited UTF-8 text table for the platform share/save
//! facility.

use chrono::NaiveDate;
use std::path::Path;

use crate::gateway::types::AttendanceExportRow;
use crate::gateway::{GatewayError, TableClient};

/// Fixed header row of the export.
pub const CSV_HEADER: &str = "Date,StudentName,Status,Note";

/// Inclusive date range for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Validate the user-entered bounds.
    ///
    /// Runs before any network call: a missing bound blocks the export
    /// locally and never reaches the gateway.
    pub fn parse(start: &str, end: &str) -> Result<Self, ExportError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(ExportError::MissingDateRange);
        }

        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .map_err(|_| ExportError::InvalidDate(start.trim().to_string()))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .map_err(|_| ExportError::InvalidDate(end.trim().to_string()))?;

        Ok(Self { start, end })
    }
}

/// Attendance CSV exporter.
pub struct AttendanceExporter {
    gateway: TableClient,
}

impl AttendanceExporter {
    /// Create a new exporter.
    pub fn new(gateway: TableClient) -> Self {
        Self { gateway }
    }

    /// Export the inclusive `[start, end]` range to CSV text.
    pub async fn export_csv(&self, start: &str, end: &str) -> Result<String, ExportError> {
        let range = DateRange::parse(start, end)?;
        self.export_range(range).await
    }

    /// Export an already-validated range to CSV text.
    pub async fn export_range(&self, range: DateRange) -> Result<String, ExportError> {
        let rows = self.fetch_rows(range).await?;
        tracing::info!(
            "Exporting {} attendance rows for {} .. {}",
            rows.len(),
            range.start,
            range.end
        );
        Ok(render_csv(&rows))
    }

    async fn fetch_rows(&self, range: DateRange) -> Result<Vec<AttendanceExportRow>, ExportError> {
        self.gateway
            .from("attendance")
            .select("date,status,note,student:student_id(name)")
            .gte("date", range.start.format("%Y-%m-%d"))
            .lte("date", range.end.format("%Y-%m-%d"))
            .order("date", false)
            .fetch()
            .await
            .map_err(ExportError::Transfer)
    }
}

/// Render fetched rows into the delimited table.
pub fn render_csv(rows: &[AttendanceExportRow]) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for row in rows {
        let name = row
            .student
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown");

        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.date.format("%Y-%m-%d"),
            escape_csv(name),
            escape_csv(row.status.display_label()),
            escape_csv(row.note.as_deref().unwrap_or("")),
        ));
    }

    csv
}

/// Suggested file name for a range export.
pub fn default_file_name(range: DateRange) -> String {
    format!(
        "absensi_{}_{}.csv",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    )
}

/// Write the rendered CSV to disk.
pub fn save_csv(path: &Path, csv: &str) -> Result<(), ExportError> {
    std::fs::write(path, csv).map_err(|e| ExportError::Io(e.to_string()))
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Both a start and an end date are required")]
    MissingDateRange,

    #[error("Not a valid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Failed to fetch attendance: {0}")]
    Transfer(#[from] GatewayError),

    #[error("Failed to write file: {0}")]
    Io(String),
}
