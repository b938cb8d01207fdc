//! Events command implementation
//!
//! Lists the events sheet most recent first, optionally narrowed by name and
//! sport.

use super::shared::{CommandSummary, load_configuration, load_events, print_json, setup_logging};
use crate::app::adapters::source::SheetSource;
use crate::app::models::Event;
use crate::app::services::report_composer::document::display_date;
use crate::app::services::results_query::{filter_events, sports_of};
use crate::cli::args::{EventsArgs, OutputFormat};
use crate::Result;
use colored::Colorize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Events command runner
pub async fn run_events(args: EventsArgs, cancel: CancellationToken) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.common.validate()?;
    debug!("Events arguments: {:?}", args);

    let config = load_configuration(&args.common)?;
    let source = SheetSource::new(config.sources.fetch_timeout_secs)?;
    let show_progress = args.common.output_format == OutputFormat::Human && !args.common.quiet;

    let events = load_events(&source, &config, show_progress, &cancel).await?;
    let listed = filter_events(&events, &args.search, &args.sport);
    info!("{} of {} events match", listed.len(), events.len());

    match args.common.output_format {
        OutputFormat::Json => print_json(&listed)?,
        OutputFormat::Human => print_events(&listed, &sports_of(&events)),
    }

    Ok(CommandSummary {
        sheets_fetched: 1,
        rows_reported: listed.len(),
        elapsed: start_time.elapsed(),
        ..CommandSummary::default()
    })
}

fn print_events(events: &[&Event], sports: &[String]) {
    if events.is_empty() {
        println!("{}", "No se encontraron eventos.".yellow());
        return;
    }

    println!("{}", "Eventos".bold().underline());
    for event in events {
        println!(
            "  {:<8} {:<40} {:<20} {}",
            event.id.cyan(),
            event.name.bold(),
            display_date(&event.date),
            event.sport.dimmed()
        );
    }
    println!();
    println!("{} {}", "Deportes:".dimmed(), sports.join(", "));
}
