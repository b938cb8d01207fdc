//! Top 10 image of one category
//!
//! Lays out at most ten ranked entries on a 1080x1600 canvas under a header
//! band with the brand logo and, when the event has one, the event logo.
//! Logos are loaded before anything is drawn; the load is bounded by a timeout
//! and can be cancelled.
//!
//! ## Architecture
//!
//! - [`text_fit`] - Fitting names and clubs into their columns
//! - [`font`] - System font discovery and glyph outlines
//! - [`canvas`] - Pixmap drawing and PNG encoding

pub mod canvas;
pub mod font;
pub mod text_fit;

use std::time::Duration;

use futures::future::OptionFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use self::canvas::{Align, Canvas, LogoImage, TextStyle, BLACK, WHITE, band_orange, brand_orange};
use self::font::FontSet;
use self::text_fit::fit_text_to_width;
use crate::app::adapters::logos::LogoSource;
use crate::app::models::{CategorySelection, Event, Record};
use crate::app::services::derived_metrics;
use crate::app::services::results_query::normalize_asset_link;
use crate::app::services::report_composer::document::display_date;
use crate::config::Config;
use crate::constants::{PLACEHOLDER, TOP10_LIMIT, image_layout as layout};
use crate::{Error, Result};

/// Notice shown when no concrete category is selected
pub const SELECT_CATEGORY_NOTICE: &str =
    "Por favor, selecciona una categoría específica para generar la imagen del Top 10.";

/// Notice shown when the selected category has nobody to show
pub const NO_ENTRIES_NOTICE: &str =
    "No hay suficientes participantes en esta categoría para generar un Top 10.";

/// Decoded logos of the header band
#[derive(Debug, Clone)]
pub struct HeaderLogos {
    pub brand: LogoImage,
    pub event: Option<LogoImage>,
}

/// A rendered Top 10 image
#[derive(Debug, Clone)]
pub struct Top10Image {
    /// Suggested download name
    pub file_name: String,

    /// PNG bytes
    pub png: Vec<u8>,
}

/// Check that an image can be produced, returning the category to draw
///
/// Runs before any logo or canvas work.
pub fn check_top10_preconditions<'a>(
    entries: &[&Record],
    selection: &'a CategorySelection,
) -> Result<&'a str> {
    let Some(category) = selection.named() else {
        return Err(Error::precondition(SELECT_CATEGORY_NOTICE));
    };
    if entries.is_empty() {
        return Err(Error::precondition(NO_ENTRIES_NOTICE));
    }
    Ok(category)
}

/// Download name of the image: `Top10_<event>_<category>.png`
pub fn image_file_name(event_name: &str, category: &str) -> String {
    format!(
        "Top10_{}_{}.png",
        underscore_whitespace(event_name),
        underscore_whitespace(category)
    )
}

fn underscore_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Load logos, then draw and encode the Top 10 image
///
/// The brand logo is always loaded; the event logo only when the event links
/// a valid one. Both loads run concurrently and must finish within the
/// configured timeout. Cancelling `cancel` abandons the loads.
pub async fn render_top10_image(
    entries: &[&Record],
    event: &Event,
    selection: &CategorySelection,
    logo_source: &dyn LogoSource,
    fonts: &FontSet,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Top10Image> {
    let category = check_top10_preconditions(entries, selection)?;
    let logos = load_header_logos(event, logo_source, config, cancel).await?;

    let png = compose_top10_image(entries, event, selection, &logos, fonts, config)?;
    let file_name = image_file_name(&event.name, category);

    info!(
        "Rendered {} ({} entries, {} bytes)",
        file_name,
        entries.len().min(TOP10_LIMIT),
        png.len()
    );
    Ok(Top10Image { file_name, png })
}

/// Await the brand logo and the optional event logo together
pub async fn load_header_logos(
    event: &Event,
    logo_source: &dyn LogoSource,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<HeaderLogos> {
    let brand_reference = config.branding.logo.as_str();
    let event_reference = event.logo.as_deref().and_then(normalize_asset_link);
    let timeout_secs = config.image.logo_timeout_secs;

    debug!(
        "Loading {} logo(s) with a {}s timeout",
        1 + usize::from(event_reference.is_some()),
        timeout_secs
    );

    let join = async {
        let event_load: OptionFuture<_> = event_reference
            .as_deref()
            .map(|reference| logo_source.load(reference))
            .into();
        let (brand, event_logo) = tokio::join!(logo_source.load(brand_reference), event_load);
        Ok::<_, Error>((brand?, event_logo.transpose()?))
    };

    let (brand_bytes, event_bytes) = tokio::select! {
        _ = cancel.cancelled() => {
            return Err(Error::processing_interrupted("logo loading was cancelled"));
        }
        joined = tokio::time::timeout(Duration::from_secs(timeout_secs), join) => {
            joined.map_err(|_| Error::logo_timeout(timeout_secs))??
        }
    };

    let brand = LogoImage::decode(brand_reference, &brand_bytes, layout::LOGO_SIZE)?;
    let event = match (event_reference.as_deref(), event_bytes) {
        (Some(reference), Some(bytes)) => {
            Some(LogoImage::decode(reference, &bytes, layout::LOGO_SIZE)?)
        }
        _ => None,
    };

    Ok(HeaderLogos { brand, event })
}

/// Draw the Top 10 image with logos already loaded
///
/// Entries must already be ranked; only the first ten are drawn.
pub fn compose_top10_image(
    entries: &[&Record],
    event: &Event,
    selection: &CategorySelection,
    logos: &HeaderLogos,
    fonts: &FontSet,
    config: &Config,
) -> Result<Vec<u8>> {
    let category = check_top10_preconditions(entries, selection)?;
    let sport = event.sport_kind();

    let mut canvas = Canvas::new(layout::WIDTH, layout::HEIGHT)?;
    let width = canvas.width() as f32;
    let center_x = width / 2.0;

    let centered = move |bold: bool, size: f32| TextStyle {
        face: fonts.face(bold),
        size,
        color: BLACK,
        align: Align::Center,
    };

    // Header band and logos
    canvas.fill_rect(0.0, 0.0, width, layout::HEADER_HEIGHT, WHITE)?;
    canvas.draw_logo(&logos.brand, layout::LOGO_MARGIN, layout::LOGO_TOP);
    if let Some(event_logo) = &logos.event {
        let x = width - layout::LOGO_MARGIN - layout::LOGO_SIZE as f32;
        canvas.draw_logo(event_logo, x, layout::LOGO_TOP);
    }

    // Titles
    canvas.draw_text(
        &config.branding.name,
        center_x,
        layout::BRAND_BASELINE,
        TextStyle {
            color: brand_orange(),
            ..centered(true, layout::BRAND_FONT_SIZE)
        },
    );
    canvas.draw_text(
        &event.name,
        center_x,
        layout::EVENT_BASELINE,
        centered(true, layout::EVENT_FONT_SIZE),
    );
    canvas.draw_text(
        &format!("Top 10 - Categoría: {}", category),
        center_x,
        layout::CATEGORY_BASELINE,
        centered(true, layout::CATEGORY_FONT_SIZE),
    );
    canvas.draw_text(
        &format!("Fecha: {}", display_date(&event.date)),
        center_x,
        layout::DATE_BASELINE,
        centered(false, layout::DATE_FONT_SIZE),
    );

    // Column header band
    canvas.fill_rect(
        layout::LOGO_MARGIN,
        layout::COLUMN_HEADER_BASELINE - layout::COLUMN_BAND_OFFSET,
        width - 2.0 * layout::LOGO_MARGIN,
        layout::COLUMN_BAND_HEIGHT,
        band_orange(),
    )?;
    let metric_header = match sport.metric() {
        derived_metrics::MetricKind::Pace => "Ritmo",
        derived_metrics::MetricKind::Speed => "Vel.",
    };
    let header_style = centered(false, layout::COLUMN_HEADER_FONT_SIZE);
    for (label, anchor) in [
        ("Pos.", layout::COL_POSITION),
        ("Dorsal", layout::COL_BIB),
        ("Nombre", layout::COL_NAME),
        ("Club", layout::COL_CLUB),
        ("Tiempo", layout::COL_TIME),
        (metric_header, layout::COL_PACE),
    ] {
        canvas.draw_text(label, anchor, layout::COLUMN_HEADER_BASELINE, header_style);
    }

    // Entry rows
    let cell_style = centered(false, layout::CELL_FONT_SIZE);
    let text_column = TextStyle {
        align: Align::Left,
        ..centered(false, layout::NAME_FONT_SIZE)
    };

    for (row, record) in entries.iter().take(TOP10_LIMIT).enumerate() {
        let baseline = layout::FIRST_ROW_BASELINE + row as f32 * layout::ROW_STEP;
        let metric =
            derived_metrics::pace_or_speed(sport, record.duration(), record.distance_km());

        for (value, anchor) in [
            (record.category_rank_text().unwrap_or(PLACEHOLDER), layout::COL_POSITION),
            (record.bib_number().unwrap_or(PLACEHOLDER), layout::COL_BIB),
            (record.duration().unwrap_or(PLACEHOLDER), layout::COL_TIME),
            (metric.as_str(), layout::COL_PACE),
        ] {
            canvas.draw_text(value, anchor, baseline, cell_style);
        }

        let name = fit_text_to_width(
            text_column.face,
            record.name().unwrap_or(PLACEHOLDER),
            layout::NAME_MAX_WIDTH,
            layout::NAME_FONT_SIZE,
        );
        let club = fit_text_to_width(
            text_column.face,
            record.club().unwrap_or(PLACEHOLDER),
            layout::CLUB_MAX_WIDTH,
            layout::NAME_FONT_SIZE,
        );
        canvas.draw_text(&name, layout::COL_NAME, baseline, text_column);
        canvas.draw_text(&club, layout::COL_CLUB, baseline, text_column);
    }

    canvas.encode_png()
}
