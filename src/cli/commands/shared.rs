//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::adapters::source::SheetSource;
use crate::app::models::{Event, Record};
use crate::app::services::results_query::{find_event, parse_events, select_for_event, sort_events_by_date};
use crate::app::services::tabular_parser::parse;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Command statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    /// Number of sheets fetched
    pub sheets_fetched: usize,
    /// Number of rows listed or reported
    pub rows_reported: usize,
    /// Files written with their sizes in bytes
    pub files_written: Vec<(String, u64)>,
    /// Total command time
    pub elapsed: Duration,
}

impl CommandSummary {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.files_written.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging
///
/// `RUST_LOG` wins over the verbosity flags.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("results_processor={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, trying the default location"),
    }

    let mut config = Config::load(args.config_file.as_deref())?;

    if let Some(events) = &args.events_source {
        config = config.with_events_source(events);
    }
    if let Some(results) = &args.results_source {
        config = config.with_results_source(results);
    }

    config.validate()?;
    Ok(config)
}

/// Fetch one sheet behind a spinner, giving up when `cancel` fires
pub async fn fetch_sheet(
    source: &SheetSource,
    location: &str,
    label: &str,
    show_progress: bool,
    cancel: &CancellationToken,
) -> Result<Vec<Record>> {
    let spinner = show_progress.then(|| create_spinner(&format!("Loading {}...", label)));

    let text = tokio::select! {
        _ = cancel.cancelled() => {
            return Err(Error::processing_interrupted(format!("loading {} was cancelled", label)));
        }
        text = source.fetch_text(location) => text,
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let records = parse(&text?);
    info!("Loaded {} {} rows", records.len(), label);
    Ok(records)
}

/// Events sheet, most recent first
pub async fn load_events(
    source: &SheetSource,
    config: &Config,
    show_progress: bool,
    cancel: &CancellationToken,
) -> Result<Vec<Event>> {
    let records = fetch_sheet(source, &config.sources.events, "events", show_progress, cancel).await?;
    let mut events = parse_events(&records);
    sort_events_by_date(&mut events);
    Ok(events)
}

/// One event and its result rows
pub struct EventResults {
    pub event: Event,
    pub records: Vec<Record>,
}

impl EventResults {
    /// Rows of the event, in sheet order
    pub fn rows(&self) -> Vec<&Record> {
        select_for_event(&self.records, &self.event.id)
    }
}

/// Fetch both sheets and pick one event
///
/// Both sheets are fetched concurrently.
pub async fn load_event_results(
    source: &SheetSource,
    config: &Config,
    event_id: &str,
    show_progress: bool,
    cancel: &CancellationToken,
) -> Result<EventResults> {
    let (events, records) = tokio::try_join!(
        load_events(source, config, show_progress, cancel),
        fetch_sheet(source, &config.sources.results, "results", false, cancel),
    )?;

    let event = find_event(&events, event_id)
        .cloned()
        .ok_or_else(|| Error::event_not_found(event_id))?;
    debug!("Selected event {} ({})", event.id, event.name);

    Ok(EventResults { event, records })
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write an artifact, creating parent directories, and return its size
pub async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::io(
                format!("Failed to create directory {}", parent.display()),
                e,
            )
        })?;
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes.len() as u64)
}

/// Replace whitespace with underscores for file names
pub fn file_name_part(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Create a spinner with the standard styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_summary_default() {
        let summary = CommandSummary::default();
        assert_eq!(summary.rows_reported, 0);
        assert_eq!(summary.total_output_size(), 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(CommandSummary::format_size(512), "512 B");
        assert_eq!(CommandSummary::format_size(2048), "2.00 KB");
        assert_eq!(CommandSummary::format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_file_name_part() {
        assert_eq!(file_name_part("10K San  Celestino"), "10K_San_Celestino");
        assert_eq!(file_name_part("Elite"), "Elite");
    }

    #[tokio::test]
    async fn test_write_artifact_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reportes").join("informe.html");

        let size = write_artifact(&path, b"<html></html>").await.unwrap();

        assert_eq!(size, 13);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_load_event_results_from_files() {
        let dir = TempDir::new().unwrap();
        let events = dir.path().join("eventos.csv");
        let results = dir.path().join("resultados.csv");
        std::fs::write(
            &events,
            "id evento,Nombre evento,Fecha,deporte\nE1,10K,12 mayo 2024,running\nE2,Fondo,3/2/2023,ciclismo\n",
        )
        .unwrap();
        std::fs::write(
            &results,
            "id evento,nombre,categoria\nE1,Ana,Elite\nE2,Luis,Elite\nE1,Sofía,Elite\n",
        )
        .unwrap();

        let config = Config::default()
            .with_events_source(events.to_string_lossy())
            .with_results_source(results.to_string_lossy());
        let source = SheetSource::new(5).unwrap();

        let loaded = load_event_results(&source, &config, "E1", false, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(loaded.event.name, "10K");
        let names: Vec<_> = loaded.rows().iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, vec!["Ana", "Sofía"]);

        let missing =
            load_event_results(&source, &config, "E9", false, &CancellationToken::new()).await;
        assert!(matches!(missing, Err(Error::EventNotFound { .. })));
    }
}
