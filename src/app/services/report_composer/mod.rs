//! Report composition
//!
//! Turns ranked records into the two shareable artifacts: a printable HTML
//! document grouped by category, and a PNG of one category's Top 10.
//!
//! ## Architecture
//!
//! - [`columns`] - Column selection for document tables
//! - [`document`] - HTML document composition
//! - [`top10`] - Top 10 image layout, fonts, logos and PNG encoding
//!
//! ## Usage
//!
//! ```rust
//! use results_processor::app::services::report_composer::{ReportVariant, compose_document};
//! use results_processor::app::services::tabular_parser::parse;
//! use results_processor::{Config, Event};
//!
//! let records = parse("categoria,nombre,posición categoria\nElite,Ana,1\n");
//! let rows: Vec<_> = records.iter().collect();
//! let event = Event {
//!     id: "E1".into(),
//!     name: "10K".into(),
//!     date: "12 mayo 2024".into(),
//!     sport: "running".into(),
//!     logo: None,
//! };
//!
//! let html = compose_document(&rows, &event, "Todas las Categorías", ReportVariant::Full, &Config::default());
//! assert!(html.contains("Resultados de 10K"));
//! ```

use crate::app::models::{CategorySelection, Record};
use crate::constants::{FULL_REPORT_LABEL, TOP5_REPORT_LABEL};
use crate::{Error, Result};

pub mod columns;
pub mod document;
pub mod top10;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::{Cell, ColumnSet};
pub use document::{build_groups, compose_document, html_escape};
pub use top10::font::{FontFace, FontSet};
pub use top10::text_fit::{TextMeasure, fit_text_to_width};
pub use top10::{
    HeaderLogos, Top10Image, check_top10_preconditions, compose_top10_image, image_file_name,
    load_header_logos, render_top10_image,
};

/// Notice shown when a single-category report has no category or no rows
pub const SINGLE_CATEGORY_NOTICE: &str = "Por favor, selecciona una categoría específica y asegúrate de que haya participantes para generar el reporte de categoría.";

/// Which rows a document lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportVariant {
    /// Every categorized row
    Full,
    /// The first five rows of every category
    Top5,
    /// One pre-filtered category
    #[value(name = "category")]
    SingleCategory,
}

impl ReportVariant {
    /// Subtitle of the document
    ///
    /// The full and top 5 listings have fixed labels; a single-category
    /// report is labelled by its category.
    pub fn report_label(self, selection: &CategorySelection) -> String {
        match self {
            ReportVariant::Full => FULL_REPORT_LABEL.to_string(),
            ReportVariant::Top5 => TOP5_REPORT_LABEL.to_string(),
            ReportVariant::SingleCategory => selection.to_string(),
        }
    }
}

/// Check that a single-category report can be produced
pub fn check_single_category_preconditions<'a>(
    rows: &[&Record],
    selection: &'a CategorySelection,
) -> Result<&'a str> {
    match selection.named() {
        Some(category) if !rows.is_empty() => Ok(category),
        _ => Err(Error::precondition(SINGLE_CATEGORY_NOTICE)),
    }
}
