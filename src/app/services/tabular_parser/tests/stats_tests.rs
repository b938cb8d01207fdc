//! Tests for parsing statistics

use super::*;
use crate::app::services::tabular_parser::{ParseStats, TabularParser};

#[test]
fn test_stats_for_aligned_sheet() {
    let result = TabularParser::new().parse(&create_test_results_sheet());

    assert_eq!(result.stats.columns, 8);
    assert_eq!(result.stats.total_rows, 4);
    assert_eq!(result.stats.aligned_rows(), 4);
    assert!(result.stats.is_aligned());
}

#[test]
fn test_stats_for_ragged_sheet() {
    let result = TabularParser::new().parse(&create_ragged_sheet());

    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.short_rows, 1);
    assert_eq!(result.stats.long_rows, 1);
    assert_eq!(result.stats.aligned_rows(), 1);
    assert!(!result.stats.is_aligned());
}

#[test]
fn test_default_stats() {
    let stats = ParseStats::default();
    assert_eq!(stats, ParseStats::new());
    assert!(stats.is_aligned());
}
