//! Setoran submissions.
//!
//! A setoran is a unit of memorization or review work submitted for
//! grading. Students submit; reviewers grade outside this codebase and
//! the awarded points show up in `siswa_poin`.

pub mod submit;
pub mod summary;

// Re-export commonly used types
pub use submit::{NewSetoran, SubmitError};
pub use summary::SetoranSummary;

use crate::gateway::types::{SetoranRow, SetoranWithStudent};
use crate::gateway::{GatewayError, TableClient};
use uuid::Uuid;

/// Fetch a student's own submissions, newest-first.
pub async fn fetch_my_setoran(
    gateway: &TableClient,
    student_id: Uuid,
) -> Result<Vec<SetoranRow>, GatewayError> {
    gateway
        .from("setoran")
        .eq("siswa_id", student_id)
        .order("created_at", true)
        .fetch()
        .await
}

/// Fetch the most recent pending submissions of an organization, joined
/// with the submitting student's name, for the review queue preview.
pub async fn fetch_pending_with_names(
    gateway: &TableClient,
    organize_id: Uuid,
    limit: usize,
) -> Result<Vec<SetoranWithStudent>, GatewayError> {
    gateway
        .from("setoran")
        .select("*,siswa:siswa_id(name)")
        .eq("organize_id", organize_id)
        .eq("status", "pending")
        .order("created_at", true)
        .limit(limit)
        .fetch()
        .await
}
