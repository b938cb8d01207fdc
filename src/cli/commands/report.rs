//! Report command implementation
//!
//! Writes the printable HTML result document of one event: every category,
//! the top five of every category, or a single category.

use super::shared::{
    CommandSummary, file_name_part, load_configuration, load_event_results, setup_logging,
    write_artifact,
};
use crate::app::adapters::source::SheetSource;
use crate::app::models::{CategorySelection, Record};
use crate::app::services::report_composer::{
    ReportVariant, check_single_category_preconditions, compose_document,
};
use crate::app::services::results_query::filter_and_rank;
use crate::cli::args::{OutputFormat, ReportArgs};
use crate::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Report command runner
pub async fn run_report(args: ReportArgs, cancel: CancellationToken) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.validate()?;
    debug!("Report arguments: {:?}", args);

    let mut config = load_configuration(&args.common)?;
    if let Some(orientation) = args.orientation {
        config = config.with_orientation(orientation);
    }

    let source = SheetSource::new(config.sources.fetch_timeout_secs)?;
    let show_progress = args.common.output_format == OutputFormat::Human && !args.common.quiet;
    let loaded = load_event_results(&source, &config, &args.event, show_progress, &cancel).await?;
    let rows = loaded.rows();

    let selection = match (args.variant, &args.category) {
        (ReportVariant::SingleCategory, Some(category)) => {
            CategorySelection::from_selector_value(category)
        }
        _ => CategorySelection::All,
    };
    let label = args.variant.report_label(&selection);

    let reported = reported_rows(&rows, args.variant, &selection, &args.search)?;

    let html = compose_document(&reported, &loaded.event, &label, args.variant, &config);

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "Reporte_{}_{}.html",
            file_name_part(&loaded.event.name),
            file_name_part(&label)
        ))
    });
    let size = write_artifact(&output, html.as_bytes()).await?;
    info!(
        "Report '{}' for event {} written to {}",
        label,
        loaded.event.id,
        output.display()
    );

    if !args.common.quiet {
        println!(
            "{} {} ({})",
            "✓ Reporte generado:".green().bold(),
            output.display(),
            CommandSummary::format_size(size)
        );
    }

    Ok(CommandSummary {
        sheets_fetched: 2,
        rows_reported: reported.len(),
        files_written: vec![(output.display().to_string(), size)],
        elapsed: start_time.elapsed(),
    })
}

/// Rows a document lists
///
/// Full and Top 5 documents take every row of the event. A single-category
/// document takes the category's rows that match `search`, ranked.
fn reported_rows<'a>(
    rows: &'a [&'a Record],
    variant: ReportVariant,
    selection: &CategorySelection,
    search: &str,
) -> Result<Vec<&'a Record>> {
    match variant {
        ReportVariant::SingleCategory => {
            let filtered = filter_and_rank(rows, selection, search);
            check_single_category_preconditions(&filtered, selection)?;
            Ok(filtered)
        }
        ReportVariant::Full | ReportVariant::Top5 => Ok(rows.to_vec()),
    }
}
