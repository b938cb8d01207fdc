//! Per-athlete lap split annotation
//!
//! Looks at the TV1..TV11 columns of a single record and flags the fastest
//! one. Laps are never compared across athletes.

use crate::app::models::Record;
use crate::app::services::derived_metrics::to_seconds;
use crate::constants::{MAX_LAPS, PERSONAL_RECORD_MARKER, fields};

/// Lap cells of one record, in lap order
pub type AnnotatedLaps = [Option<String>; MAX_LAPS];

/// Column name of the fastest populated lap
///
/// Ties go to the lowest lap number. Laps whose time cannot be read never
/// win, so a record without any readable lap has no fastest lap.
pub fn fastest_lap_key(record: &Record) -> Option<&'static str> {
    let mut fastest: Option<(&'static str, f64)> = None;

    for (index, field) in fields::LAPS.iter().enumerate() {
        let Some(time) = record.lap(index + 1) else {
            continue;
        };
        let seconds = to_seconds(time);
        if seconds < fastest.map_or(f64::INFINITY, |(_, best)| best) {
            fastest = Some((*field, seconds));
        }
    }

    fastest.map(|(field, _)| field)
}

/// Lap cells with the fastest one marked `" (PR)"`
///
/// Entry `i` holds lap `i + 1`: the raw time, the marked time for the fastest
/// lap, or `None` when the lap is not populated.
pub fn annotate_laps(record: &Record) -> AnnotatedLaps {
    let fastest = fastest_lap_key(record);

    std::array::from_fn(|index| {
        record.lap(index + 1).map(|time| {
            if fastest == Some(fields::LAPS[index]) {
                format!("{}{}", time, PERSONAL_RECORD_MARKER)
            } else {
                time.to_string()
            }
        })
    })
}

/// Whether any record populates the given 1-based lap
pub fn lap_populated(records: &[&Record], lap_number: usize) -> bool {
    records.iter().any(|record| record.lap(lap_number).is_some())
}

/// 1-based lap numbers populated by at least one record
pub fn populated_laps(records: &[&Record]) -> Vec<usize> {
    (1..=MAX_LAPS)
        .filter(|lap_number| lap_populated(records, *lap_number))
        .collect()
}
