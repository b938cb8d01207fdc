//! Tests for the sheet export parser

use super::*;
use crate::app::services::tabular_parser::{TabularParser, parse, to_delimited};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_results_sheet() {
    let records = parse(&create_test_results_sheet());

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].get("nombre"), Some("Ana Pérez"));
    assert_eq!(records[0].get("posición categoria"), Some("1"));
    assert_eq!(records[3].get("id evento"), Some("E2"));

    // Every record shares the header order
    let names: Vec<&str> = records[1].iter().map(|(key, _)| key).collect();
    assert_eq!(
        names,
        vec![
            "id evento",
            "nombre",
            "categoria",
            "dorsal",
            "tiempo",
            "Distancia",
            "posición categoria",
            "club"
        ]
    );
}

#[test]
fn test_trailing_empty_field_is_present_but_empty() {
    let records = parse(&create_test_results_sheet());

    // "Marta Ruiz" row ends with a comma: the club exists and is empty
    assert_eq!(records[2].get("club"), Some(""));
    assert_eq!(records[2].club(), None);
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\n \t \n").is_empty());
}

#[test]
fn test_header_only_input() {
    let result = TabularParser::new().parse("a,b,c\n");
    assert!(result.records.is_empty());
    assert_eq!(result.stats.columns, 3);
    assert_eq!(result.stats.total_rows, 0);
}

#[test]
fn test_blank_lines_and_padding_are_ignored() {
    let text = "\n  a , b \n\n 1 , 2 \r\n\n3,4\n\n";
    let records = parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("a"), Some("1"));
    assert_eq!(records[0].get("b"), Some("2"));
    assert_eq!(records[1].get("b"), Some("4"));
}

#[test]
fn test_short_and_long_rows() {
    let records = parse(&create_ragged_sheet());

    assert_eq!(records.len(), 3);

    assert_eq!(records[1].get("a"), Some("4"));
    assert_eq!(records[1].get("b"), None);
    assert_eq!(records[1].get("c"), None);

    assert_eq!(records[2].get("c"), Some("7"));
    assert_eq!(records[2].iter().count(), 3);
}

#[test]
fn test_embedded_delimiter_misaligns_columns() {
    // Quoting is not supported, so the quote characters stay in the values
    let records = parse("nombre,club\n\"Pérez, Ana\",Trotadores\n");

    assert_eq!(records[0].get("nombre"), Some("\"Pérez"));
    assert_eq!(records[0].get("club"), Some("Ana\""));
}

#[test]
fn test_round_trip_preserves_rows_and_values() {
    let text = create_test_results_sheet();
    let result = TabularParser::new().parse(&text);
    let header = result.records[0].header().names().to_vec();

    let rewritten = to_delimited(&header, &result.records);
    let reparsed = parse(&rewritten);

    assert_eq!(reparsed.len(), result.records.len());
    for (original, again) in result.records.iter().zip(&reparsed) {
        let original: Vec<_> = original.iter().collect();
        let again: Vec<_> = again.iter().collect();
        assert_eq!(original, again);
    }
}
