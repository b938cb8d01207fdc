//! Registered command implementation
//!
//! Lists the registrations sheet with a colored status per entrant.

use super::shared::{CommandSummary, fetch_sheet, load_configuration, print_json, setup_logging};
use crate::app::adapters::source::SheetSource;
use crate::app::models::{Registration, RegistrationStatus};
use crate::cli::args::{OutputFormat, RegisteredArgs};
use crate::{Error, Result};
use colored::{ColoredString, Colorize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Registered command runner
pub async fn run_registered(
    args: RegisteredArgs,
    cancel: CancellationToken,
) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.common.validate()?;
    debug!("Registered arguments: {:?}", args);

    let mut config = load_configuration(&args.common)?;
    if let Some(location) = &args.source {
        config = config.with_registrations_source(location);
    }
    let location = config.sources.registrations.as_deref().ok_or_else(|| {
        Error::configuration(
            "No registrations sheet configured; set sources.registrations or pass --source",
        )
    })?;

    let source = SheetSource::new(config.sources.fetch_timeout_secs)?;
    let show_progress = args.common.output_format == OutputFormat::Human && !args.common.quiet;
    let records = fetch_sheet(&source, location, "registrations", show_progress, &cancel).await?;
    let registrations: Vec<Registration> = records.iter().map(Registration::from_record).collect();

    match args.common.output_format {
        OutputFormat::Json => print_json(&registrations)?,
        OutputFormat::Human => print_registrations(&registrations),
    }

    Ok(CommandSummary {
        sheets_fetched: 1,
        rows_reported: registrations.len(),
        elapsed: start_time.elapsed(),
        ..CommandSummary::default()
    })
}

fn print_registrations(registrations: &[Registration]) {
    if registrations.is_empty() {
        println!("{}", "No hay inscritos registrados todavía.".yellow());
        return;
    }

    println!("{}", "Listado de Inscritos".bold().underline());
    for registration in registrations {
        println!(
            "  {:<30} {:<25} {:<25} {}",
            registration.name.bold(),
            registration.event,
            registration.category,
            status_label(&registration.status)
        );
    }
}

fn status_label(status: &RegistrationStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        RegistrationStatus::Registered => label.green(),
        RegistrationStatus::Pending => label.yellow(),
        RegistrationStatus::Other(_) => label.red(),
    }
}
