//! Tour trip-time formatting.
//!
//! Trip times are stored for display in 12-hour form (`8:00 AM`) and edited
//! in 24-hour form (`08:00`). Writes go through [`normalize_trip_time`],
//! reads for the edit form through [`TripTime::to_24_hour`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Error message returned for any trip time that fails validation.
pub const INVALID_TIME_MESSAGE: &str = "Invalid time format. Use 8:00 AM format.";

static TWELVE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(0?[1-9]|1[0-2]):[0-5][0-9]\s?(AM|PM)$").expect("valid trip time regex")
});

static MERIDIAN_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s?(AM|PM)$").expect("valid meridian regex")
});

/// Departure / return window of a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripTime {
    pub from: String,
    pub to: String,
}

impl TripTime {
    /// Convert both ends back to `HH:MM` for edit forms. Values that are not
    /// in 12-hour form are passed through unchanged.
    pub fn to_24_hour(&self) -> TripTime {
        TripTime {
            from: to_24_hour(&self.from),
            to: to_24_hour(&self.to),
        }
    }
}

/// Convert a 24-hour `HH:MM` value into `H:MM AM/PM`.
///
/// Values already carrying a meridian are returned trimmed and upper-cased.
/// The result is checked against the 12-hour pattern.
pub fn to_12_hour(value: &str) -> Result<String, CoreError> {
    let value = value.trim();
    let invalid = || CoreError::Validation(INVALID_TIME_MESSAGE.to_string());

    let converted = if MERIDIAN_PARTS.is_match(value) {
        value.to_uppercase()
    } else {
        let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
        if hours > 23 {
            return Err(invalid());
        }
        let period = if hours >= 12 { "PM" } else { "AM" };
        let display_hours = match hours {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        format!("{display_hours}:{} {period}", minutes.trim())
    };

    if TWELVE_HOUR.is_match(&converted) {
        Ok(converted)
    } else {
        Err(invalid())
    }
}

/// Convert `H:MM AM/PM` back to `HH:MM`.
///
/// `12 AM` becomes `00`, `12 PM` stays `12`, other PM hours add 12 and AM
/// hours are zero-padded. Inputs without a meridian are returned unchanged.
pub fn to_24_hour(value: &str) -> String {
    let Some(caps) = MERIDIAN_PARTS.captures(value.trim()) else {
        return value.to_string();
    };
    let hours = &caps[1];
    let minutes = &caps[2];
    let is_pm = caps[3].eq_ignore_ascii_case("PM");
    let numeric: u32 = hours.parse().unwrap_or(0);

    let converted = match (is_pm, numeric) {
        (false, 12) => "00".to_string(),
        (true, 12) => "12".to_string(),
        (true, h) => (h + 12).to_string(),
        (false, _) => format!("{hours:0>2}"),
    };
    format!("{converted}:{minutes}")
}

/// Normalize a submitted trip time (both ends) into 12-hour display form.
pub fn normalize_trip_time(input: &TripTime) -> Result<TripTime, CoreError> {
    Ok(TripTime {
        from: to_12_hour(&input.from)?,
        to: to_12_hour(&input.to)?,
    })
}

/// Parse the serialized `tripTime` form field (`{"from": "...", "to": "..."}`)
/// and normalize it.
pub fn parse_trip_time(raw: &str) -> Result<TripTime, CoreError> {
    let parsed: TripTime = serde_json::from_str(raw.trim())
        .map_err(|_| CoreError::Validation(INVALID_TIME_MESSAGE.to_string()))?;
    normalize_trip_time(&parsed)
}
