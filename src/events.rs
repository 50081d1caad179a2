//! Events from background tasks into the frame loop.
//!
//! Spawned fetch tasks never touch view state directly; they send one of
//! these over a crossbeam channel and the app drains it every frame.

use crate::attendance::export::{DateRange, ExportError};
use crate::attendance::roster::{DailyDetail, RosterFetch};
use crate::attendance::AttendanceStats;
use crate::dashboard::DashboardStats;
use crate::gateway::types::{AttendanceRow, OrganizeRow, SetoranRow};
use crate::gateway::{GatewayError, Profile};
use crate::organize::JoinError;
use crate::points::LeaderboardEntry;
use crate::prayer::{PrayerError, PrayerTimes};
use crate::setoran::SubmitError;

/// Attendance screen payload, shaped by role.
#[derive(Debug, Clone)]
pub enum AbsensiData {
    /// The student's own history
    Student {
        records: Vec<AttendanceRow>,
        stats: AttendanceStats,
    },
    /// The teacher/parent recap over the class
    Class {
        roster: RosterFetch,
        details: Vec<DailyDetail>,
    },
}

/// An event delivered to the frame loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The signed-in profile was loaded (or not found).
    ProfileLoaded(Result<Option<Profile>, GatewayError>),
    /// Dashboard data arrived.
    DashboardLoaded {
        seq: u64,
        result: Result<DashboardStats, GatewayError>,
    },
    /// Attendance data arrived.
    AbsensiLoaded {
        seq: u64,
        result: Result<AbsensiData, GatewayError>,
    },
    /// The student's setoran list arrived.
    SetoranLoaded {
        seq: u64,
        result: Result<Vec<SetoranRow>, GatewayError>,
    },
    /// The ranked leaderboard arrived.
    LeaderboardLoaded {
        seq: u64,
        result: Result<Vec<LeaderboardEntry>, GatewayError>,
    },
    /// Prayer times arrived.
    PrayerLoaded(Result<PrayerTimes, PrayerError>),
    /// A CSV export finished rendering.
    ExportReady(Result<(DateRange, String), ExportError>),
    /// A setoran submission completed.
    SetoranSubmitted(Result<(), SubmitError>),
    /// A join-by-code attempt completed.
    OrganizeJoined(Result<OrganizeRow, JoinError>),
    /// The backend signalled a change on a table.
    TableChanged(String),
}

/// Monotonic request-sequence guard.
///
/// Every refresh takes a token; a response is applied only while its token
/// is still the latest one issued for that stream, so a slow response can
/// never overwrite the result of a newer refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshGuard {
    latest: u64,
}

impl RefreshGuard {
    /// Issue the token for a new refresh, superseding earlier ones.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response with this token may still be applied.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}
