//! Setoran aggregates.

use crate::gateway::types::{SetoranKind, SetoranRow, SetoranStatus};

/// Summary over a student's submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetoranSummary {
    /// All submissions
    pub total: usize,
    /// Waiting for review
    pub pending: usize,
    /// Accepted by a reviewer
    pub accepted: usize,
    /// Rejected by a reviewer
    pub rejected: usize,
    /// Sum of awarded points
    pub total_points: i64,
    /// Accepted memorization submissions
    pub hafalan_accepted: usize,
    /// Accepted review submissions
    pub murojaah_accepted: usize,
}

impl SetoranSummary {
    /// Compute the summary from a set of submissions, in any order.
    pub fn from_records(records: &[SetoranRow]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.status {
                SetoranStatus::Pending => summary.pending += 1,
                SetoranStatus::Accepted => summary.accepted += 1,
                SetoranStatus::Rejected => summary.rejected += 1,
            }

            summary.total_points += record.poin;

            if record.status == SetoranStatus::Accepted {
                match record.jenis {
                    SetoranKind::Hafalan => summary.hafalan_accepted += 1,
                    SetoranKind::Murojaah => summary.murojaah_accepted += 1,
                }
            }
        }

        summary
    }
}
