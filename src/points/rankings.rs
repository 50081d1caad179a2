//! Leaderboard rankings.
//!
//! Ranks are recomputed from scratch on every fetch: full stable sort by
//! descending total, then dense 1-based assignment. Nothing incremental,
//! no caching of a prior ranking.

use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::attendance::roster::fetch_students;
use crate::gateway::types::PointsRow;
use crate::gateway::{GatewayError, TableClient, FAN_OUT_LIMIT};

/// One ranked student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub student_id: Uuid,
    pub name: String,
    pub total_points: i64,
    pub memorization_points: i64,
    pub quiz_points: i64,
    /// 1-based rank by descending total points
    pub rank: u32,
}

/// Point category used for the leader cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCategory {
    Memorization,
    Quiz,
}

/// Fetch the organization's leaderboard.
///
/// Students come back ordered by name; one points lookup fans out per
/// student, bounded by [`FAN_OUT_LIMIT`]. A student without a points row
/// (or whose lookup fails) enters with zeros rather than dropping out.
pub async fn fetch_leaderboard(
    gateway: &TableClient,
    organize_id: Uuid,
) -> Result<Vec<LeaderboardEntry>, GatewayError> {
    let students = fetch_students(gateway, organize_id).await?;
    tracing::debug!("Ranking {} students", students.len());

    let entries = stream::iter(students)
        .map(|student| {
            let gateway = gateway.clone();
            async move {
                let points = gateway
                    .from("siswa_poin")
                    .eq("siswa_id", student.id)
                    .fetch_one::<PointsRow>()
                    .await;

                let points = match points {
                    Ok(points) => points,
                    Err(e) => {
                        tracing::warn!("Points lookup failed for {}: {}", student.name, e);
                        None
                    }
                };

                match points {
                    Some(points) => LeaderboardEntry {
                        student_id: student.id,
                        name: student.name,
                        total_points: points.total_poin,
                        memorization_points: points.poin_hafalan,
                        quiz_points: points.poin_quiz,
                        rank: 0,
                    },
                    None => LeaderboardEntry {
                        student_id: student.id,
                        name: student.name,
                        total_points: 0,
                        memorization_points: 0,
                        quiz_points: 0,
                        rank: 0,
                    },
                }
            }
        })
        .buffered(FAN_OUT_LIMIT)
        .collect::<Vec<_>>()
        .await;

    Ok(rank_by_total(entries))
}

/// Sort descending by total points and assign dense 1-based ranks.
///
/// The sort is stable, so equal totals keep their input order; callers
/// feed entries ordered by name, which makes the tie-break alphabetical.
pub fn rank_by_total(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }
    entries
}

/// Find a student's own entry.
pub fn entry_for(entries: &[LeaderboardEntry], student_id: Uuid) -> Option<&LeaderboardEntry> {
    entries.iter().find(|e| e.student_id == student_id)
}

/// The leading student in a point category, first-on-tie.
pub fn leader_by(
    entries: &[LeaderboardEntry],
    category: PointCategory,
) -> Option<&LeaderboardEntry> {
    let points = |entry: &LeaderboardEntry| match category {
        PointCategory::Memorization => entry.memorization_points,
        PointCategory::Quiz => entry.quiz_points,
    };

    entries
        .iter()
        .reduce(|best, entry| if points(entry) > points(best) { entry } else { best })
}
