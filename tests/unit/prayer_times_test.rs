//! Unit tests for prayer time selection.

use chrono::{Duration, NaiveTime};
use tahfidz::prayer::{format_remaining, next_prayer, PrayerTimes, PRAYER_NAMES};

fn times() -> PrayerTimes {
    PrayerTimes {
        fajr: NaiveTime::from_hms_opt(4, 30, 0).unwrap(),
        dhuhr: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        asr: NaiveTime::from_hms_opt(15, 15, 0).unwrap(),
        maghrib: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        isha: NaiveTime::from_hms_opt(19, 10, 0).unwrap(),
    }
}

#[test]
fn test_schedule_order_matches_names() {
    let schedule = times().schedule();
    let names: Vec<&str> = schedule.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, PRAYER_NAMES);
    assert!(schedule.windows(2).all(|pair| pair[0].1 < pair[1].1));
}

#[test]
fn test_first_prayer_after_now_is_selected() {
    let next = next_prayer(&times(), NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    assert_eq!(next.name, "Ashar");
    assert_eq!(next.remaining, Duration::minutes(135));
}

#[test]
fn test_exact_prayer_time_moves_to_next() {
    // At 12:00 sharp Dzuhur has started; the next upcoming one is Ashar
    let next = next_prayer(&times(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(next.name, "Ashar");
}

#[test]
fn test_after_isha_wraps_to_tomorrow_fajr() {
    let next = next_prayer(&times(), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
    assert_eq!(next.name, "Subuh");
    assert_eq!(next.remaining, Duration::hours(5));
}

#[test]
fn test_format_remaining() {
    assert_eq!(format_remaining(Duration::minutes(135)), "2 jam 15 menit");
    assert_eq!(format_remaining(Duration::minutes(45)), "45 menit");
    assert_eq!(format_remaining(Duration::minutes(0)), "0 menit");
}
