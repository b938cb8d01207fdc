//! Results query engine
//!
//! Filtering, searching and ranking of timing records within an event and
//! category context, plus the event listing queries used by the front end.
//! Every query is a pure function of its inputs: the category selection and
//! search term are passed explicitly and nothing is cached between calls.
//!
//! ## Architecture
//!
//! - [`records`] - Event selection, category listing, search and ranking
//! - [`events`] - Event sheet listing, date ordering and lookup
//! - [`links`] - Asset link normalization for logos, photos and certificates
//!
//! ## Usage
//!
//! ```rust
//! use results_processor::app::services::results_query::filter_and_rank;
//! use results_processor::app::services::tabular_parser::parse;
//! use results_processor::CategorySelection;
//!
//! let records = parse("categoria,nombre,posición categoria\nElite,Ana,2\nElite,Eva,1\n");
//! let ranked = filter_and_rank(&records, &CategorySelection::All, "");
//!
//! assert_eq!(ranked[0].name(), Some("Eva"));
//! ```

pub mod events;
pub mod links;
pub mod records;

#[cfg(test)]
pub mod tests;

// Re-export main operations for easy access
pub use events::{filter_events, find_event, parse_events, sort_events_by_date, sports_of};
pub use links::{download_link, normalize_asset_link};
pub use records::{
    categories_of, category_options, filter_and_rank, group_by_category, matches_search,
    rank_records, select_for_event,
};
