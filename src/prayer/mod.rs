//! Daily prayer times.
//!
//! Fetches the five daily prayer times for the configured coordinates
//! from the Aladhan API and derives the next upcoming prayer for the
//! dashboard card.

use chrono::{Duration, NaiveTime};
use serde::Deserialize;

/// The five daily prayers with their display names.
pub const PRAYER_NAMES: [&str; 5] = ["Subuh", "Dzuhur", "Ashar", "Maghrib", "Isya"];

/// One day's prayer schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerTimes {
    pub fajr: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimes {
    /// The schedule in chronological order, paired with display names.
    pub fn schedule(&self) -> [(&'static str, NaiveTime); 5] {
        [
            (PRAYER_NAMES[0], self.fajr),
            (PRAYER_NAMES[1], self.dhuhr),
            (PRAYER_NAMES[2], self.asr),
            (PRAYER_NAMES[3], self.maghrib),
            (PRAYER_NAMES[4], self.isha),
        ]
    }
}

/// The next upcoming prayer relative to some instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPrayer {
    pub name: &'static str,
    pub time: NaiveTime,
    pub remaining: Duration,
}

/// Find the next prayer after `now`.
///
/// When every prayer of the day has passed, the next one is tomorrow's
/// Fajr and the remaining time wraps past midnight.
pub fn next_prayer(times: &PrayerTimes, now: NaiveTime) -> NextPrayer {
    for (name, time) in times.schedule() {
        if now < time {
            return NextPrayer {
                name,
                time,
                remaining: time - now,
            };
        }
    }

    NextPrayer {
        name: PRAYER_NAMES[0],
        time: times.fajr,
        remaining: Duration::days(1) - (now - times.fajr),
    }
}

/// Compact "2 jam 5 menit" rendering for the card.
pub fn format_remaining(remaining: Duration) -> String {
    let minutes = remaining.num_minutes().max(0);
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours > 0 {
        format!("{} jam {} menit", hours, minutes)
    } else {
        format!("{} menit", minutes)
    }
}

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
}

#[derive(Debug, Deserialize)]
struct Timings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
}

/// Fetch today's prayer times for the given coordinates.
pub async fn fetch_prayer_times(
    http: &reqwest::Client,
    latitude: f64,
    longitude: f64,
) -> Result<PrayerTimes, PrayerError> {
    let url = format!(
        "https://api.aladhan.com/v1/timings?latitude={}&longitude={}&method=2",
        latitude, longitude
    );

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| PrayerError::Network(e.to_string()))?;

    let body: TimingsResponse = response
        .json()
        .await
        .map_err(|e| PrayerError::Decode(e.to_string()))?;

    Ok(PrayerTimes {
        fajr: parse_timing(&body.data.timings.fajr)?,
        dhuhr: parse_timing(&body.data.timings.dhuhr)?,
        asr: parse_timing(&body.data.timings.asr)?,
        maghrib: parse_timing(&body.data.timings.maghrib)?,
        isha: parse_timing(&body.data.timings.isha)?,
    })
}

/// Parse an `HH:MM` timing; the API may append a timezone suffix like
/// `"04:41 (WIB)"`.
fn parse_timing(raw: &str) -> Result<NaiveTime, PrayerError> {
    let time_part = raw.split_whitespace().next().unwrap_or(raw);
    NaiveTime::parse_from_str(time_part, "%H:%M")
        .map_err(|_| PrayerError::Parse(raw.to_string()))
}

/// Prayer times errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PrayerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Not a valid timing: {0}")]
    Parse(String),
}
