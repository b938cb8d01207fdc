//! Delimited-text parser for timing sheet exports
//!
//! This module turns the raw text of a published sheet into header-keyed
//! records. The format is deliberately simple: the first non-blank line is the
//! header, every following non-blank line is a row, and fields are separated by
//! a single comma with no quoting or escaping. A value that contains a comma
//! shifts the remaining columns of its row; that is a known limitation of the
//! source sheets and is not compensated for.
//!
//! ## Architecture
//!
//! - [`parser`] - Line splitting, header handling and record construction
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use results_processor::app::services::tabular_parser::TabularParser;
//!
//! let text = "dorsal,nombre\n101,Ana\n102,Luis\n";
//! let result = TabularParser::new().parse(text);
//!
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.records[0].get("nombre"), Some("Ana"));
//! ```

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{TabularParser, parse, to_delimited};
pub use stats::{ParseResult, ParseStats};
