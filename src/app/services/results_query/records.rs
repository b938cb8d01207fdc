//! Record selection, search and ranking

use std::collections::BTreeMap;

use tracing::debug;

use crate::app::models::{CategoryGroup, CategorySelection, Record};
use crate::constants::UNCATEGORIZED_LABEL;

/// Records of one event, in input order
///
/// Matches the event-id column exactly; records without one never match.
pub fn select_for_event<'a>(records: &'a [Record], event_id: &str) -> Vec<&'a Record> {
    let selected: Vec<&Record> = records
        .iter()
        .filter(|record| record.event_id() == Some(event_id))
        .collect();

    debug!(
        "Selected {} of {} records for event {}",
        selected.len(),
        records.len(),
        event_id
    );
    selected
}

/// Distinct non-empty categories in first-seen order
pub fn categories_of<R: AsRef<Record>>(records: &[R]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for record in records.iter().map(as_record) {
        if let Some(category) = record.category() {
            if !categories.iter().any(|seen| seen == category) {
                categories.push(category.to_string());
            }
        }
    }
    categories
}

/// Selector options: unselected, all, then every category
pub fn category_options(categories: &[String]) -> Vec<CategorySelection> {
    [CategorySelection::Unselected, CategorySelection::All]
        .into_iter()
        .chain(categories.iter().cloned().map(CategorySelection::Named))
        .collect()
}

/// Whether a record's bib or name contains the term, ignoring case
///
/// An empty term matches everything.
pub fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [record.bib_number(), record.name()]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&term))
}

/// Filter by category selection and search term, then rank
///
/// `Unselected` always yields nothing; `All` keeps every category; a named
/// category is matched exactly.
pub fn filter_and_rank<'a, R>(
    records: &'a [R],
    selection: &CategorySelection,
    search_term: &str,
) -> Vec<&'a Record>
where
    R: AsRef<Record>,
{
    let mut kept: Vec<&Record> = match selection {
        CategorySelection::Unselected => return Vec::new(),
        CategorySelection::All => records.iter().map(as_record).collect(),
        CategorySelection::Named(category) => records
            .iter()
            .map(as_record)
            .filter(|record| record.category() == Some(category.as_str()))
            .collect(),
    };

    kept.retain(|record| matches_search(record, search_term));
    rank_records(&mut kept);
    kept
}

/// Stable sort by category rank, unranked records last in input order
pub fn rank_records(records: &mut [&Record]) {
    records.sort_by_key(|record| {
        let rank = record.category_rank();
        (rank.is_none(), rank)
    });
}

/// Group records by category in alphabetical order, each group ranked
///
/// Records without a category are collected under the uncategorized label
/// when `keep_uncategorized` is set, and dropped otherwise.
pub fn group_by_category<'a>(
    records: &[&'a Record],
    keep_uncategorized: bool,
) -> Vec<CategoryGroup<'a>> {
    let mut groups: BTreeMap<String, Vec<&'a Record>> = BTreeMap::new();

    for record in records {
        let label = match record.category() {
            Some(category) => category,
            None if keep_uncategorized => UNCATEGORIZED_LABEL,
            None => continue,
        };
        groups.entry(label.to_string()).or_default().push(*record);
    }

    groups
        .into_iter()
        .map(|(label, mut records)| {
            rank_records(&mut records);
            CategoryGroup { label, records }
        })
        .collect()
}

fn as_record<R: AsRef<Record>>(record: &R) -> &Record {
    record.as_ref()
}
