//! Core sheet export parser implementation
//!
//! Splits the text into lines, reads the header and zips every row onto it.

use std::sync::Arc;
use tracing::{debug, warn};

use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Header, Record};
use crate::constants::FIELD_DELIMITER;

/// Parser for comma-delimited sheet exports
///
/// Parsing is total: empty or whitespace-only input yields no records, short
/// rows get absent trailing values and long rows lose their extra values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularParser;

impl TabularParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse sheet text into records with statistics
    pub fn parse(&self, text: &str) -> ParseResult {
        let mut stats = ParseStats::new();

        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let Some(header_line) = lines.next() else {
            debug!("Sheet text is empty, no records parsed");
            return ParseResult {
                records: Vec::new(),
                stats,
            };
        };

        let header = Arc::new(Header::new(split_fields(header_line)));
        stats.columns = header.len();

        let records: Vec<Record> = lines
            .map(|line| {
                stats.total_rows += 1;
                let values = split_fields(line);
                if values.len() < header.len() {
                    stats.short_rows += 1;
                } else if values.len() > header.len() {
                    stats.long_rows += 1;
                }
                Record::new(Arc::clone(&header), values.into_iter().map(Some).collect())
            })
            .collect();

        if !stats.is_aligned() {
            warn!(
                "{} of {} rows did not match the {}-column header ({} short, {} long)",
                stats.short_rows + stats.long_rows,
                stats.total_rows,
                stats.columns,
                stats.short_rows,
                stats.long_rows
            );
        }
        debug!(
            "Parsed {} records with {} columns",
            records.len(),
            stats.columns
        );

        ParseResult { records, stats }
    }
}

/// Parse sheet text into records
pub fn parse(text: &str) -> Vec<Record> {
    TabularParser::new().parse(text).records
}

/// Write records back as comma-delimited text under the given header
///
/// Absent values are written as empty fields. Values are written verbatim,
/// so a value containing a comma will not survive a second parse.
pub fn to_delimited(header: &[String], records: &[Record]) -> String {
    let delimiter = FIELD_DELIMITER.to_string();
    let mut text = header.join(&delimiter);
    text.push('\n');

    for record in records {
        let row: Vec<&str> = header
            .iter()
            .map(|field| record.get(field).unwrap_or_default())
            .collect();
        text.push_str(&row.join(&delimiter));
        text.push('\n');
    }

    text
}

/// Split one line into trimmed fields
fn split_fields(line: &str) -> Vec<String> {
    line.split(FIELD_DELIMITER)
        .map(|field| field.trim().to_string())
        .collect()
}
