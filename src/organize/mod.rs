//! Organization membership.
//!
//! Students join a class by entering its short code. Joining updates the
//! user row and makes sure the points row exists so the leaderboard can
//! pick the student up immediately.

use serde::Serialize;
use uuid::Uuid;

use crate::gateway::types::{OrganizeRow, PointsRow, Profile};
use crate::gateway::{GatewayError, TableClient};

/// Wire shape of a points-row initialization.
#[derive(Debug, Serialize)]
struct PointsInsert {
    siswa_id: Uuid,
    total_poin: i64,
    poin_hafalan: i64,
    poin_quiz: i64,
}

/// Wire shape of the membership update.
#[derive(Debug, Serialize)]
struct MembershipPatch {
    organize_id: Uuid,
}

/// Join an organization by its class code.
///
/// The code is matched upper-cased against active organizations only.
/// Returns the joined organization for the confirmation message.
pub async fn join_by_code(
    gateway: &TableClient,
    profile: &Profile,
    code: &str,
) -> Result<OrganizeRow, JoinError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(JoinError::EmptyCode);
    }

    if profile.organize_id.is_some() {
        return Err(JoinError::AlreadyJoined);
    }

    let organize = gateway
        .from("organizes")
        .eq("code", &code)
        .eq("is_active", "true")
        .fetch_one::<OrganizeRow>()
        .await?
        .ok_or(JoinError::UnknownCode)?;

    gateway
        .update(
            "users",
            "id",
            &profile.id.to_string(),
            &MembershipPatch {
                organize_id: organize.id,
            },
        )
        .await?;

    ensure_points_row(gateway, profile.id).await?;

    tracing::info!("Joined organization {}", organize.name);
    Ok(organize)
}

/// Initialize the student's points row with zeros when it does not exist.
async fn ensure_points_row(gateway: &TableClient, student_id: Uuid) -> Result<(), JoinError> {
    let existing = gateway
        .from("siswa_poin")
        .eq("siswa_id", student_id)
        .fetch_one::<PointsRow>()
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    gateway
        .insert(
            "siswa_poin",
            &PointsInsert {
                siswa_id: student_id,
                total_poin: 0,
                poin_hafalan: 0,
                poin_quiz: 0,
            },
        )
        .await?;

    Ok(())
}

/// Join errors.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("Enter a class code")]
    EmptyCode,

    #[error("Already joined a class")]
    AlreadyJoined,

    #[error("Class code not found or no longer active")]
    UnknownCode,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
