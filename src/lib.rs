//! Tahfidz - Quran Memorization Program Companion
//!
//! Desktop client for a tahfidz program backed by a hosted table store.
//! Screens fetch rows, compute their aggregates (attendance statistics,
//! point rankings, setoran summaries) client-side and re-render; a
//! websocket change-notification channel triggers refetches.

pub mod attendance;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod gateway;
pub mod organize;
pub mod points;
pub mod prayer;
pub mod setoran;
pub mod ui;

// Re-export commonly used types
pub use attendance::AttendanceStats;
pub use events::{AppEvent, RefreshGuard};
pub use gateway::{Profile, RealtimeClient, TableClient};
pub use points::LeaderboardEntry;
pub use setoran::SetoranSummary;
