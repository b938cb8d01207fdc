//! Event sheet queries
//!
//! Events are listed newest first. Dates go through the date normalizer, so an
//! event with an unreadable date keeps its place among the other unreadable
//! ones at the end of the listing.

use tracing::debug;

use crate::app::models::{Event, Record};
use crate::app::services::date_normalizer::parse_date;
use crate::constants::SPORT_ALL;

/// Build typed events from events sheet records
pub fn parse_events(records: &[Record]) -> Vec<Event> {
    records.iter().map(Event::from_record).collect()
}

/// Sort events by date, newest first
///
/// The sort is stable, so events sharing a date (or an unreadable one) keep
/// their sheet order.
pub fn sort_events_by_date(events: &mut [Event]) {
    events.sort_by_cached_key(|event| std::cmp::Reverse(parse_date(&event.date)));
}

/// Distinct non-empty sport labels in first-seen order
pub fn sports_of(events: &[Event]) -> Vec<String> {
    let mut sports: Vec<String> = Vec::new();
    for event in events {
        if !event.sport.is_empty() && !sports.contains(&event.sport) {
            sports.push(event.sport.clone());
        }
    }
    sports
}

/// Filter events by name term and sport selection
///
/// The name term matches case-insensitively anywhere in the event name and is
/// ignored when empty. The sport must match exactly unless it is the "all
/// sports" option.
pub fn filter_events<'a>(events: &'a [Event], name_term: &str, sport: &str) -> Vec<&'a Event> {
    let term = name_term.to_lowercase();

    let filtered: Vec<&Event> = events
        .iter()
        .filter(|event| term.is_empty() || event.name.to_lowercase().contains(&term))
        .filter(|event| sport == SPORT_ALL || event.sport == sport)
        .collect();

    debug!(
        "{} of {} events match name '{}' and sport '{}'",
        filtered.len(),
        events.len(),
        name_term,
        sport
    );
    filtered
}

/// Look an event up by id
pub fn find_event<'a>(events: &'a [Event], id: &str) -> Option<&'a Event> {
    events.iter().find(|event| event.id == id)
}
