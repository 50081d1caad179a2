//! Attendance tracking.
//!
//! Provides per-student statistics, class roster summaries and CSV export.

pub mod export;
pub mod roster;
pub mod stats;

// Re-export commonly used types
pub use export::AttendanceExporter;
pub use roster::{RosterFetch, StudentAttendance};
pub use stats::AttendanceStats;
