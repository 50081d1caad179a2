//! Leaderboard search and category sorting.
//!
//! Search and the category chips are combinable and recomputed together
//! from the full ranking on any input change. Re-sorting by a sub-metric
//! reorders the view only; every entry keeps its overall rank number.

use super::rankings::LeaderboardEntry;

/// Sort key selected by the category chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardSort {
    /// Overall ranking order
    #[default]
    Total,
    /// Memorization points
    Memorization,
    /// Quiz points
    Quiz,
}

impl LeaderboardSort {
    pub fn display_label(&self) -> &'static str {
        match self {
            LeaderboardSort::Total => "Semua",
            LeaderboardSort::Memorization => "Hafalan",
            LeaderboardSort::Quiz => "Quiz",
        }
    }
}

/// Case-insensitive substring search on the student name.
///
/// An empty or whitespace query returns the collection unchanged, which
/// also makes the filter idempotent.
pub fn search_by_name(entries: &[LeaderboardEntry], query: &str) -> Vec<LeaderboardEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Stable re-sort of a (possibly filtered) view by the selected key.
pub fn apply_sort(entries: &mut [LeaderboardEntry], sort: LeaderboardSort) {
    match sort {
        LeaderboardSort::Total => {
            entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        }
        LeaderboardSort::Memorization => {
            entries.sort_by(|a, b| b.memorization_points.cmp(&a.memorization_points));
        }
        LeaderboardSort::Quiz => {
            entries.sort_by(|a, b| b.quiz_points.cmp(&a.quiz_points));
        }
    }
}

/// Search and sort together, from the full ranking.
pub fn filtered_view(
    entries: &[LeaderboardEntry],
    query: &str,
    sort: LeaderboardSort,
) -> Vec<LeaderboardEntry> {
    let mut view = search_by_name(entries, query);
    apply_sort(&mut view, sort);
    view
}
