//! Tests for record selection, search and ranking

use super::*;
use crate::app::models::CategorySelection;
use crate::app::services::results_query::records::*;
use pretty_assertions::assert_eq;

fn names(records: &[&Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name().unwrap_or("-").to_string())
        .collect()
}

#[test]
fn test_select_for_event_preserves_order() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");

    assert_eq!(selected.len(), 6);
    assert_eq!(selected[0].name(), Some("Ana Pérez"));
    assert_eq!(selected[5].name(), Some("Carla Ana Méndez"));
    assert!(select_for_event(&records, "e1").is_empty());
}

#[test]
fn test_categories_first_seen_order() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");

    assert_eq!(
        categories_of(&selected),
        vec!["Libre Femenino".to_string(), "Libre Masculino".to_string()]
    );
}

#[test]
fn test_category_options_prepend_sentinels() {
    let options = category_options(&["Elite".to_string()]);
    assert_eq!(
        options,
        vec![
            CategorySelection::Unselected,
            CategorySelection::All,
            CategorySelection::Named("Elite".to_string()),
        ]
    );
}

#[test]
fn test_unselected_is_always_empty() {
    let records = create_test_results();
    assert!(filter_and_rank(&records, &CategorySelection::Unselected, "").is_empty());
    assert!(filter_and_rank(&records, &CategorySelection::Unselected, "Ana").is_empty());
}

#[test]
fn test_named_category_is_ranked() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");
    let selection = CategorySelection::Named("Libre Femenino".to_string());

    let ranked = filter_and_rank(&selected, &selection, "");
    assert_eq!(
        names(&ranked),
        vec!["Sofía Lara", "Ana Pérez", "Carla Ana Méndez", "Marta Ruiz"]
    );
}

#[test]
fn test_all_keeps_uncategorized_records() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");

    let ranked = filter_and_rank(&selected, &CategorySelection::All, "");
    assert_eq!(ranked.len(), 6);
    // Two rank-1 records keep input order, unranked records trail
    assert_eq!(names(&ranked[..2]), vec!["Luis Gómez", "Sofía Lara"]);
    assert_eq!(names(&ranked[4..]), vec!["Marta Ruiz", "Invitado"]);
}

#[test]
fn test_search_matches_name_or_bib() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");

    let by_name = filter_and_rank(&selected, &CategorySelection::All, "ana");
    assert_eq!(names(&by_name), vec!["Ana Pérez", "Carla Ana Méndez"]);

    let by_bib = filter_and_rank(&selected, &CategorySelection::All, "99");
    assert_eq!(names(&by_bib), vec!["Invitado"]);

    let none = filter_and_rank(&selected, &CategorySelection::All, "zzz");
    assert!(none.is_empty());
}

#[test]
fn test_rank_records_is_stable() {
    let records = vec![
        ranked("3", "c"),
        ranked("1", "a"),
        ranked("", "x"),
        ranked("2", "b"),
        ranked("DNS", "y"),
        ranked("1", "a2"),
    ];
    let mut refs: Vec<&Record> = records.iter().collect();

    rank_records(&mut refs);
    assert_eq!(names(&refs), vec!["a", "a2", "b", "c", "x", "y"]);
}

#[test]
fn test_group_by_category() {
    let records = create_test_results();
    let selected = select_for_event(&records, "E1");

    let groups = group_by_category(&selected, false);
    let labels: Vec<&str> = groups.iter().map(|group| group.label.as_str()).collect();
    assert_eq!(labels, vec!["Libre Femenino", "Libre Masculino"]);
    assert_eq!(groups[0].records[0].name(), Some("Sofía Lara"));

    let groups = group_by_category(&selected, true);
    let labels: Vec<&str> = groups.iter().map(|group| group.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Libre Femenino", "Libre Masculino", "Sin Categoría"]
    );
}
