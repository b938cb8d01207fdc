//! Data models for race results processing
//!
//! This module contains the core data structures for representing timing sheet
//! rows, events and the derived per-athlete views used by the reports.

use crate::app::services::derived_metrics::{self, MetricKind};
use crate::app::services::lap_analyzer;
use crate::constants::{
    self, CATEGORY_ALL, CATEGORY_UNSELECTED, RUNNING_SPORT, event_fields, fields,
    registration_fields, registration_status,
};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Header and Record Structures
// =============================================================================

/// Column layout shared by every record of one parsed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    /// Build a header from column names in sheet order
    ///
    /// A repeated column name resolves to its last occurrence.
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        Self { names, index }
    }

    /// Column names in sheet order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a column, if the header declares it
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn is_shadowed(&self, position: usize) -> bool {
        self.index.get(&self.names[position]) != Some(&position)
    }
}

/// One row of a timing sheet, keyed by the header of its batch
///
/// The key set is whatever the sheet declares. Well-known columns are reached
/// through the typed accessors below; everything else passes through
/// untouched and shows up in [`Record::details`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<Option<String>>,
}

impl Record {
    /// Create a record from a shared header and positional values
    ///
    /// Missing trailing values become absent and extra values are dropped.
    pub fn new(header: Arc<Header>, mut values: Vec<Option<String>>) -> Self {
        values.resize(header.len(), None);
        Self { header, values }
    }

    /// Build a standalone record from `(column, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<Option<String>>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Some(value.into())))
            .unzip();
        Self::new(Arc::new(Header::new(names)), values)
    }

    /// The header shared with the rest of the batch
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Raw value of a column; `None` when the column is unknown or the row
    /// was too short to reach it
    pub fn get(&self, field: &str) -> Option<&str> {
        self.header
            .position(field)
            .and_then(|position| self.values[position].as_deref())
    }

    /// Value of a column, treating empty text as absent
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    /// Whether a column holds non-blank text
    pub fn has_value(&self, field: &str) -> bool {
        self.get(field).is_some_and(|value| !value.trim().is_empty())
    }

    /// `(column, value)` entries in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.header
            .names
            .iter()
            .enumerate()
            .filter(|(position, _)| !self.header.is_shadowed(*position))
            .map(|(position, name)| (name.as_str(), self.values[position].as_deref()))
    }

    // -------------------------------------------------------------------------
    // Typed accessors for the well-known result columns
    // -------------------------------------------------------------------------

    pub fn event_id(&self) -> Option<&str> {
        self.get(fields::EVENT_ID)
    }

    pub fn name(&self) -> Option<&str> {
        self.text(fields::NAME)
    }

    pub fn category(&self) -> Option<&str> {
        self.text(fields::CATEGORY)
    }

    pub fn bib_number(&self) -> Option<&str> {
        self.text(fields::BIB_NUMBER)
    }

    pub fn club(&self) -> Option<&str> {
        self.text(fields::CLUB)
    }

    /// Official finish time as written in the sheet
    pub fn duration(&self) -> Option<&str> {
        self.text(fields::DURATION)
    }

    pub fn chip_duration(&self) -> Option<&str> {
        self.text(fields::CHIP_DURATION)
    }

    /// Race distance in kilometres, when the column parses as a number
    pub fn distance_km(&self) -> Option<f64> {
        self.text(fields::DISTANCE)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|distance| distance.is_finite())
    }

    /// Category position as written in the sheet
    pub fn category_rank_text(&self) -> Option<&str> {
        self.text(fields::CATEGORY_RANK)
    }

    /// Numeric category position; `None` for DNS/DNF style values
    pub fn category_rank(&self) -> Option<u32> {
        self.category_rank_text().and_then(parse_rank)
    }

    pub fn overall_rank(&self) -> Option<&str> {
        self.text(fields::OVERALL_RANK)
    }

    pub fn gender_rank(&self) -> Option<&str> {
        self.text(fields::GENDER_RANK)
    }

    /// Free-text laps summary column
    pub fn laps_summary(&self) -> Option<&str> {
        self.get(fields::LAPS_SUMMARY)
            .filter(|value| !value.trim().is_empty())
    }

    /// Split time of the lap with the given 1-based number
    pub fn lap(&self, lap_number: usize) -> Option<&str> {
        fields::LAPS
            .get(lap_number.checked_sub(1)?)
            .and_then(|field| self.text(field))
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.text(fields::PHOTO_URL)
    }

    pub fn certificate_url(&self) -> Option<&str> {
        self.text(fields::CERTIFICATE_URL)
    }

    /// Entries for the expanded details view
    ///
    /// Every column without a dedicated place in the athlete card and with a
    /// non-blank value, in header order, with underscores in the column name
    /// shown as spaces.
    pub fn details(&self) -> Vec<(String, &str)> {
        self.iter()
            .filter(|(key, _)| !fields::DETAILS_EXCLUDED.contains(key))
            .filter_map(|(key, value)| {
                value
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (key.replace('_', " "), value))
            })
            .collect()
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<_> = self.iter().collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Read a position the way sheet exports write them
///
/// Leading whitespace is skipped and the leading run of ASCII digits is the
/// position, so `"3"` and `"3°"` both read as 3. Text without leading digits
/// and a position of 0 are treated as unranked.
pub fn parse_rank(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end]
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank > 0)
}

// =============================================================================
// Sport and Event Structures
// =============================================================================

/// Sport family of an event, which selects the derived metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sport {
    /// Running events report pace (min/km) and carry a chip time column
    Running,
    /// Every other sport reports speed (km/h)
    Other,
}

impl Sport {
    /// Classify a sheet sport label; only "running" (any case) is running
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(RUNNING_SPORT) {
            Sport::Running
        } else {
            Sport::Other
        }
    }

    pub fn is_running(self) -> bool {
        self == Sport::Running
    }

    /// Metric reported for this sport
    pub fn metric(self) -> MetricKind {
        match self {
            Sport::Running => MetricKind::Pace,
            Sport::Other => MetricKind::Speed,
        }
    }
}

/// A competition from the events sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Identifier matched against the results sheet
    pub id: String,

    /// Display name
    pub name: String,

    /// Display date, as written in the sheet
    pub date: String,

    /// Sport label as written in the sheet
    pub sport: String,

    /// Logo reference (URL or path), when the sheet provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Event {
    /// Build an event from an events sheet record; missing columns become empty
    pub fn from_record(record: &Record) -> Self {
        let text = |field: &str| record.get(field).unwrap_or_default().to_string();
        Self {
            id: text(event_fields::ID),
            name: text(event_fields::NAME),
            date: text(event_fields::DATE),
            sport: text(event_fields::SPORT),
            logo: record
                .get(event_fields::LOGO)
                .map(str::trim)
                .filter(|logo| !logo.is_empty())
                .map(str::to_string),
        }
    }

    /// Sport family used for pace/speed dispatch
    pub fn sport_kind(&self) -> Sport {
        Sport::from_label(&self.sport)
    }
}

// =============================================================================
// Category Selection
// =============================================================================

/// The category selector state, passed explicitly to queries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// Nothing chosen yet; queries show nobody
    #[default]
    Unselected,
    /// Every category
    All,
    /// Exactly one category label
    Named(String),
}

impl CategorySelection {
    /// Interpret a selector value, honoring the sentinel options
    pub fn from_selector_value(value: &str) -> Self {
        match value {
            CATEGORY_UNSELECTED => CategorySelection::Unselected,
            CATEGORY_ALL => CategorySelection::All,
            other => CategorySelection::Named(other.to_string()),
        }
    }

    /// Selector value of this option
    pub fn selector_value(&self) -> &str {
        match self {
            CategorySelection::Unselected => CATEGORY_UNSELECTED,
            CategorySelection::All => CATEGORY_ALL,
            CategorySelection::Named(name) => name,
        }
    }

    /// The concrete category, if one is selected
    pub fn named(&self) -> Option<&str> {
        match self {
            CategorySelection::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelection::Unselected => f.write_str(constants::CATEGORY_UNSELECTED_LABEL),
            other => f.write_str(other.selector_value()),
        }
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// A record plus the values computed from it for display
#[derive(Debug, Clone, Serialize)]
pub struct DerivedAthleteView<'a> {
    /// The underlying sheet row
    pub record: &'a Record,

    /// Pace (running) or speed (other sports), or the placeholder
    pub pace_or_speed: String,

    /// Column name of the athlete's fastest lap
    pub fastest_lap_key: Option<&'static str>,
}

impl<'a> DerivedAthleteView<'a> {
    /// Derive the display values of one athlete
    pub fn derive(record: &'a Record, sport: Sport) -> Self {
        let pace_or_speed =
            derived_metrics::pace_or_speed(sport, record.duration(), record.distance_km());
        Self {
            record,
            pace_or_speed,
            fastest_lap_key: lap_analyzer::fastest_lap_key(record),
        }
    }
}

/// Records of one category, ranked for display
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub label: String,
    pub records: Vec<&'a Record>,
}

// =============================================================================
// Registrations
// =============================================================================

/// Registration state of an entrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistrationStatus {
    Registered,
    Pending,
    Other(String),
}

impl RegistrationStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            registration_status::REGISTERED => RegistrationStatus::Registered,
            registration_status::PENDING => RegistrationStatus::Pending,
            other => RegistrationStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Registered => f.write_str(registration_status::REGISTERED),
            RegistrationStatus::Pending => f.write_str(registration_status::PENDING),
            RegistrationStatus::Other(label) => f.write_str(label),
        }
    }
}

/// One entrant of the registrations sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub event: String,
    pub name: String,
    pub category: String,
    pub status: RegistrationStatus,
}

impl Registration {
    pub fn from_record(record: &Record) -> Self {
        let text = |field: &str| record.get(field).unwrap_or_default().to_string();
        Self {
            event: text(registration_fields::EVENT),
            name: text(registration_fields::NAME),
            category: text(registration_fields::CATEGORY),
            status: RegistrationStatus::from_label(
                record.get(registration_fields::STATUS).unwrap_or_default(),
            ),
        }
    }
}
