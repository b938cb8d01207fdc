//! Parsing statistics and result structures for sheet exports
//!
//! Rows never fail to parse; the statistics only record how many rows had to
//! be padded or cut to fit the header, which usually points at a comma inside
//! a value.

use crate::app::models::Record;

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records in sheet order
    pub records: Vec<Record>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of header columns
    pub columns: usize,

    /// Number of non-blank data rows encountered
    pub total_rows: usize,

    /// Rows with fewer values than header columns
    pub short_rows: usize,

    /// Rows with more values than header columns; the extras are dropped
    pub long_rows: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows whose value count matched the header
    pub fn aligned_rows(&self) -> usize {
        self.total_rows - self.short_rows - self.long_rows
    }

    /// Whether every row matched the header
    pub fn is_aligned(&self) -> bool {
        self.short_rows == 0 && self.long_rows == 0
    }
}
