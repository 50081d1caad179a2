//! Remote data gateway.
//!
//! The hosted table store is an external collaborator: a row-based query
//! interface over named tables plus a websocket change-notification
//! channel. Nothing is cached here; every screen refetches and recomputes
//! its derived state in full.

pub mod client;
pub mod realtime;
pub mod types;

// Re-export commonly used types
pub use client::{Query, TableClient};
pub use realtime::{RealtimeClient, TableChange};
pub use types::Profile;

/// Maximum number of in-flight per-entity requests during a fan-out.
///
/// Per-student queries go out one request per row; this cap bounds the
/// burst instead of issuing the whole roster at once.
pub const FAN_OUT_LIMIT: usize = 8;

/// Gateway errors.
///
/// No retries anywhere: a failed call is terminal for the user action that
/// triggered it and the previous view state is retained. A single-row
/// lookup that finds nothing is NOT an error; it surfaces as `Ok(None)`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}
