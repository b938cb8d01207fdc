//! Results command implementation
//!
//! Lists the ranked results of one event for a category selection, the way
//! the result tables show them.

use super::shared::{CommandSummary, load_configuration, load_event_results, print_json, setup_logging};
use crate::app::adapters::source::SheetSource;
use crate::app::models::{CategorySelection, DerivedAthleteView, Event};
use crate::app::services::derived_metrics::with_unit;
use crate::app::services::results_query::{
    categories_of, category_options, filter_and_rank, group_by_category, normalize_asset_link,
};
use crate::cli::args::{OutputFormat, ResultsArgs};
use crate::constants::{CATEGORY_ALL, PLACEHOLDER};
use crate::Result;
use colored::Colorize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Results command runner
pub async fn run_results(args: ResultsArgs, cancel: CancellationToken) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.common.validate()?;
    debug!("Results arguments: {:?}", args);

    let config = load_configuration(&args.common)?;
    let source = SheetSource::new(config.sources.fetch_timeout_secs)?;
    let show_progress = args.common.output_format == OutputFormat::Human && !args.common.quiet;

    let loaded = load_event_results(&source, &config, &args.event, show_progress, &cancel).await?;
    let rows = loaded.rows();
    let selection = selection_from_args(&args);

    let ranked = filter_and_rank(&rows, &selection, &args.search);
    info!(
        "{} of {} athletes of event {} shown for '{}'",
        ranked.len(),
        rows.len(),
        loaded.event.id,
        selection
    );

    let sport = loaded.event.sport_kind();
    let views: Vec<DerivedAthleteView<'_>> = ranked
        .iter()
        .map(|record| DerivedAthleteView::derive(*record, sport))
        .collect();

    match args.common.output_format {
        OutputFormat::Json => print_json(&views)?,
        OutputFormat::Human => {
            if selection == CategorySelection::Unselected {
                print_category_hint(&categories_of(&rows));
            } else if selection == CategorySelection::All && !ranked.is_empty() {
                // One block per category, rows without one under their own label
                for group in group_by_category(&ranked, true) {
                    let views: Vec<DerivedAthleteView<'_>> = group
                        .records
                        .iter()
                        .map(|record| DerivedAthleteView::derive(*record, sport))
                        .collect();
                    let heading = CategorySelection::Named(group.label);
                    print_results(&loaded.event, &heading, &views, args.details);
                    println!();
                }
            } else {
                print_results(&loaded.event, &selection, &views, args.details);
            }
        }
    }

    Ok(CommandSummary {
        sheets_fetched: 2,
        rows_reported: views.len(),
        elapsed: start_time.elapsed(),
        ..CommandSummary::default()
    })
}

/// Category selection from `--all` / `--category`
pub fn selection_from_args(args: &ResultsArgs) -> CategorySelection {
    if args.all {
        return CategorySelection::All;
    }
    match &args.category {
        Some(category) => CategorySelection::from_selector_value(category),
        None => CategorySelection::Unselected,
    }
}

fn print_category_hint(categories: &[String]) {
    println!("{}", "Selecciona una categoría con --category o usa --all.".yellow());
    println!();
    println!("{}", "Categorías:".bold());
    for option in category_options(categories)
        .iter()
        .filter(|option| **option != CategorySelection::Unselected)
    {
        if option.selector_value() == CATEGORY_ALL {
            println!("  {} (--all)", option);
        } else {
            println!("  {}", option);
        }
    }
}

fn print_results(
    event: &Event,
    selection: &CategorySelection,
    views: &[DerivedAthleteView<'_>],
    details: bool,
) {
    println!(
        "{} {} {}",
        event.name.bold(),
        "-".dimmed(),
        selection.to_string().cyan()
    );

    if views.is_empty() {
        println!("{}", "No hay resultados para esta selección.".yellow());
        return;
    }

    let unit = event.sport_kind().metric();
    for view in views {
        let record = view.record;
        println!(
            "  {:>4}  {:>6}  {:<30} {:<20} {:>9}  {}",
            record.category_rank_text().unwrap_or(PLACEHOLDER).bold(),
            record.bib_number().unwrap_or(PLACEHOLDER),
            record.name().unwrap_or(PLACEHOLDER),
            record.club().unwrap_or(PLACEHOLDER).dimmed(),
            record.duration().unwrap_or(PLACEHOLDER),
            with_unit(&view.pace_or_speed, unit)
        );

        if let Some(lap) = view.fastest_lap_key {
            println!(
                "        {} {} ({})",
                "Vuelta más rápida:".dimmed(),
                record.get(lap).unwrap_or(PLACEHOLDER),
                lap
            );
        }

        if details {
            for (key, value) in record.details() {
                println!("        {}: {}", key.dimmed(), value);
            }
            for (label, link) in [
                ("Foto", record.photo_url()),
                ("Certificado", record.certificate_url()),
            ] {
                if let Some(link) = link.and_then(normalize_asset_link) {
                    println!("        {}: {}", label.dimmed(), link.underline());
                }
            }
        }
    }
}
