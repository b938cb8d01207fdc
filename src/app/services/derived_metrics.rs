//! Pace, speed and duration arithmetic
//!
//! Finish and lap times arrive as `"H:MM:SS"` or `"MM:SS"` text. Everything
//! here degrades instead of failing: an unreadable duration converts to
//! infinity so it ranks after every real time, and a pace or speed that cannot
//! be derived is shown as the placeholder dash.
//!
//! Rounding rules:
//! - pace seconds round half up, and 60 carries into the minutes, so a pace
//!   is never printed as `4:60`
//! - speeds round half up to hundredths, so `20.125` prints as `20.13`

use crate::app::models::Sport;
use crate::constants::PLACEHOLDER;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Which derived metric a sport reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Minutes per kilometre
    Pace,
    /// Kilometres per hour
    Speed,
}

impl MetricKind {
    /// Unit suffix used in documents
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Pace => "min/km",
            MetricKind::Speed => "km/h",
        }
    }
}

/// Convert `"H:MM:SS"` or `"MM:SS"` into total seconds
///
/// An empty token counts as zero, so `"1::03"` is 3603 seconds. Empty text,
/// any other number of `:`-separated tokens, or a token that is not a number
/// yields `f64::INFINITY`.
pub fn to_seconds(duration: &str) -> f64 {
    if duration.is_empty() {
        return f64::INFINITY;
    }

    let parts: Option<Vec<f64>> = duration
        .split(':')
        .map(|part| match part.trim() {
            "" => Some(0.0),
            token => token.parse::<f64>().ok(),
        })
        .collect();

    match parts.as_deref() {
        Some([hours, minutes, seconds]) => {
            hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds
        }
        Some([minutes, seconds]) => minutes * SECONDS_PER_MINUTE + seconds,
        _ => f64::INFINITY,
    }
}

/// Minutes per kilometre as `"M:SS"`
///
/// Minutes are floored and the remaining seconds rounded half up; a rounded
/// value of 60 carries into the minutes, giving `5:00` instead of `4:60`.
/// Returns the placeholder when the
/// duration is empty or unreadable, or the distance is zero or not finite.
pub fn pace(duration: &str, distance_km: f64) -> String {
    let Some(total_seconds) = usable_seconds(duration, distance_km) else {
        return PLACEHOLDER.to_string();
    };

    let seconds_per_km = total_seconds / distance_km;
    let mut minutes = (seconds_per_km / SECONDS_PER_MINUTE).floor() as i64;
    let mut seconds = (seconds_per_km % SECONDS_PER_MINUTE).round() as i64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }

    format!("{}:{:02}", minutes, seconds)
}

/// Kilometres per hour with two decimals, ties rounded up
///
/// Returns the placeholder under the same conditions as [`pace`], and also
/// for a zero duration.
pub fn speed(duration: &str, distance_km: f64) -> String {
    let Some(total_seconds) = usable_seconds(duration, distance_km) else {
        return PLACEHOLDER.to_string();
    };

    let hours = total_seconds / SECONDS_PER_HOUR;
    if hours == 0.0 {
        return PLACEHOLDER.to_string();
    }

    let kmh = distance_km / hours;
    format!("{:.2}", (kmh * 100.0).round() / 100.0)
}

/// Pace for running, speed for every other sport
///
/// Absent inputs produce the placeholder.
pub fn pace_or_speed(sport: Sport, duration: Option<&str>, distance_km: Option<f64>) -> String {
    let (Some(duration), Some(distance_km)) = (duration, distance_km) else {
        return PLACEHOLDER.to_string();
    };

    match sport.metric() {
        MetricKind::Pace => pace(duration, distance_km),
        MetricKind::Speed => speed(duration, distance_km),
    }
}

/// Append the metric unit, leaving the placeholder bare
pub fn with_unit(value: &str, kind: MetricKind) -> String {
    if value == PLACEHOLDER {
        value.to_string()
    } else {
        format!("{} {}", value, kind.unit())
    }
}

fn usable_seconds(duration: &str, distance_km: f64) -> Option<f64> {
    if duration.is_empty() || distance_km == 0.0 || !distance_km.is_finite() {
        return None;
    }
    Some(to_seconds(duration)).filter(|seconds| seconds.is_finite())
}
