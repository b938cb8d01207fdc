//! Image command implementation
//!
//! Renders the Top 10 PNG of one category and writes it under its download
//! name.

use super::shared::{
    CommandSummary, create_spinner, load_configuration, load_event_results, setup_logging,
    write_artifact,
};
use crate::app::adapters::logos::DefaultLogoSource;
use crate::app::adapters::source::{SheetSource, http_client};
use crate::app::models::CategorySelection;
use crate::app::services::report_composer::{
    FontSet, check_top10_preconditions, render_top10_image,
};
use crate::app::services::results_query::filter_and_rank;
use crate::cli::args::{ImageArgs, OutputFormat};
use crate::constants::TOP10_LIMIT;
use crate::{Error, Result};
use colored::Colorize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Image command runner
pub async fn run_image(args: ImageArgs, cancel: CancellationToken) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.validate()?;
    debug!("Image arguments: {:?}", args);

    let mut config = load_configuration(&args.common)?;
    if let Some(seconds) = args.logo_timeout_secs {
        config = config.with_logo_timeout_secs(seconds);
    }

    let source = SheetSource::new(config.sources.fetch_timeout_secs)?;
    let show_progress = args.common.output_format == OutputFormat::Human && !args.common.quiet;
    let loaded = load_event_results(&source, &config, &args.event, show_progress, &cancel).await?;
    let rows = loaded.rows();

    let selection = args
        .category
        .as_deref()
        .map(CategorySelection::from_selector_value)
        .unwrap_or_default();
    let entries = filter_and_rank(&rows, &selection, &args.search);

    // Reject before font discovery and logo downloads
    check_top10_preconditions(&entries, &selection)?;

    let family = config.image.font_family.clone();
    let fonts = tokio::task::spawn_blocking(move || FontSet::load_system(family.as_deref()))
        .await
        .map_err(|e| Error::font(format!("Font discovery task failed: {}", e)))??;

    let logo_source = DefaultLogoSource::new(http_client(config.image.logo_timeout_secs)?);
    let spinner = show_progress.then(|| create_spinner("Rendering Top 10..."));
    let rendered = render_top10_image(
        &entries,
        &loaded.event,
        &selection,
        &logo_source,
        &fonts,
        &config,
        &cancel,
    )
    .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let image = rendered?;

    let output = args.output_dir.join(&image.file_name);
    let size = write_artifact(&output, &image.png).await?;
    info!("Top 10 image written to {}", output.display());

    if !args.common.quiet {
        println!(
            "{} {} ({})",
            "✓ Imagen generada:".green().bold(),
            output.display(),
            CommandSummary::format_size(size)
        );
    }

    Ok(CommandSummary {
        sheets_fetched: 2,
        rows_reported: entries.len().min(TOP10_LIMIT),
        files_written: vec![(output.display().to_string(), size)],
        elapsed: start_time.elapsed(),
    })
}
