//! Column selection for the result document
//!
//! Which columns a document carries depends on the sport and on what the
//! reported rows actually populate; every category table of one document
//! shares the same column set.

use crate::app::models::{Record, Sport};
use crate::app::services::derived_metrics::{self, MetricKind};
use crate::app::services::lap_analyzer::{annotate_laps, populated_laps};
use crate::constants::{PLACEHOLDER, lap_field};

/// One table cell of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub align_left: bool,
}

impl Cell {
    fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align_left: false,
        }
    }

    fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align_left: true,
        }
    }

    fn or_placeholder(value: Option<&str>) -> Self {
        Self::centered(value.unwrap_or(PLACEHOLDER))
    }
}

/// Columns shown by one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    pub sport: Sport,

    /// Laps summary column, when some row has a non-blank summary
    pub laps_summary: bool,

    /// 1-based lap numbers populated by at least one row
    pub laps: Vec<usize>,
}

impl ColumnSet {
    /// Pick the columns for the rows a document will show
    pub fn for_rows(sport: Sport, rows: &[&Record]) -> Self {
        Self {
            sport,
            laps_summary: rows.iter().any(|record| record.laps_summary().is_some()),
            laps: populated_laps(rows),
        }
    }

    /// Chip time is only recorded for running
    pub fn chip_time(&self) -> bool {
        self.sport.is_running()
    }

    /// Header labels in column order
    pub fn headers(&self) -> Vec<Cell> {
        let mut headers = vec![
            Cell::centered("Pos Cat."),
            Cell::centered("Pos Gral."),
            Cell::centered("Dorsal"),
            Cell::left("Nombre"),
            Cell::centered("Club"),
            Cell::centered("Tiempo Oficial"),
        ];
        if self.chip_time() {
            headers.push(Cell::centered("Tiempo Chip"));
        }
        headers.push(Cell::centered(match self.sport.metric() {
            MetricKind::Pace => "Ritmo",
            MetricKind::Speed => "Vel. k/h",
        }));
        if self.laps_summary {
            headers.push(Cell::centered("Vueltas"));
        }
        headers.extend(self.laps.iter().map(|lap| Cell::centered(lap_field(*lap))));
        headers
    }

    /// Cells of one row, aligned with [`ColumnSet::headers`]
    pub fn cells(&self, record: &Record) -> Vec<Cell> {
        let mut cells = vec![
            Cell::or_placeholder(record.category_rank_text()),
            Cell::or_placeholder(record.overall_rank()),
            Cell::or_placeholder(record.bib_number()),
            Cell::left(record.name().unwrap_or(PLACEHOLDER)),
            Cell::or_placeholder(record.club()),
            Cell::or_placeholder(record.duration()),
        ];
        if self.chip_time() {
            cells.push(Cell::or_placeholder(record.chip_duration()));
        }

        let metric = derived_metrics::pace_or_speed(
            self.sport,
            record.duration(),
            record.distance_km(),
        );
        cells.push(Cell::centered(derived_metrics::with_unit(
            &metric,
            self.sport.metric(),
        )));

        if self.laps_summary {
            cells.push(Cell::or_placeholder(record.laps_summary()));
        }
        if !self.laps.is_empty() {
            let annotated = annotate_laps(record);
            cells.extend(
                self.laps
                    .iter()
                    .map(|lap| Cell::or_placeholder(annotated[lap - 1].as_deref())),
            );
        }
        cells
    }
}
