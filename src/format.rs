//! Display formatting shared by the front desk and the patient dashboard.
//!
//! All functions are total: malformed input is echoed back rather than
//! rejected, so a bad record never blanks out a card.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder for a missing date.
pub const MISSING_DATE: &str = "N/A";

/// Convert a 24-hour `HH:MM[:SS]` string into `H:MM AM/PM`.
///
/// Empty input yields an empty string. Input with fewer than two
/// colon-separated parts, or a non-numeric hour, is returned unchanged.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() < 2 {
        return time.to_string();
    }

    let hour: u32 = match parts[0].trim().parse() {
        Ok(h) => h,
        Err(_) => return time.to_string(),
    };
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{display_hour}:{} {suffix}", parts[1])
}

/// Long date form, e.g. `January 5, 2024`. Missing input yields `N/A`.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => MISSING_DATE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(ts) => ts.format("%B %-d, %Y").to_string(),
            None => s.to_string(),
        },
    }
}

/// Short date with time, e.g. `Jan 5, 2024, 09:30 AM`. Missing input yields `N/A`.
pub fn format_date_time(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => MISSING_DATE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
            None => s.to_string(),
        },
    }
}

/// Stagger for card entry animations: 100ms per position.
pub fn animation_delay(index: usize) -> String {
    format!("{}ms", index * 100)
}

/// Accepts `YYYY-MM-DD`, RFC 3339, and naive ISO datetimes with `T` or a space.
/// Dates without a time resolve to midnight.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
