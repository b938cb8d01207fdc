//! Tests for the Top 10 image

use std::time::Duration;

use tiny_skia::Pixmap;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::app::models::CategorySelection;
use crate::app::services::report_composer::top10::{NO_ENTRIES_NOTICE, SELECT_CATEGORY_NOTICE};
use crate::app::services::report_composer::{
    FontSet, check_top10_preconditions, image_file_name, load_header_logos, render_top10_image,
};
use crate::app::services::results_query::filter_and_rank;
use crate::config::Config;

fn elite() -> CategorySelection {
    CategorySelection::Named("Elite".to_string())
}

/// System fonts, or `None` on machines without any installed face
fn system_fonts() -> Option<FontSet> {
    match FontSet::load_system(None) {
        Ok(fonts) => Some(fonts),
        Err(e) => {
            println!("Skipping rendering test, no usable system font: {}", e);
            None
        }
    }
}

#[test]
fn test_preconditions_require_named_category() {
    let records = create_large_category();
    let rows: Vec<&Record> = records.iter().collect();

    for selection in [CategorySelection::Unselected, CategorySelection::All] {
        let error = check_top10_preconditions(&rows, &selection).unwrap_err();
        assert_eq!(error.to_string(), SELECT_CATEGORY_NOTICE);
    }
}

#[test]
fn test_preconditions_require_entries() {
    let error = check_top10_preconditions(&[], &elite()).unwrap_err();
    assert!(error.is_precondition());
    assert_eq!(error.to_string(), NO_ENTRIES_NOTICE);

    // Category is checked first
    let error = check_top10_preconditions(&[], &CategorySelection::All).unwrap_err();
    assert_eq!(error.to_string(), SELECT_CATEGORY_NOTICE);
}

#[test]
fn test_image_file_name() {
    assert_eq!(
        image_file_name("10K San Celestino", "Libre Femenino"),
        "Top10_10K_San_Celestino_Libre_Femenino.png"
    );
    assert_eq!(image_file_name("Fondo", "Elite"), "Top10_Fondo_Elite.png");
}

#[tokio::test]
async fn test_loads_brand_logo_only_without_event_logo() {
    let source = MockLogoSource::immediate();
    let logos = load_header_logos(
        &create_running_event(),
        &source,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(source.load_count(), 1);
    assert_eq!((logos.brand.width(), logos.brand.height()), (100, 100));
    assert!(logos.event.is_none());
}

#[tokio::test]
async fn test_loads_both_logos() {
    let source = MockLogoSource::immediate();
    let logos = load_header_logos(
        &create_cycling_event(),
        &source,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(source.load_count(), 2);
    assert!(logos.event.is_some());
}

#[tokio::test]
async fn test_invalid_event_logo_is_skipped() {
    let mut event = create_running_event();
    event.logo = Some("no es un enlace".to_string());
    let source = MockLogoSource::immediate();

    let logos = load_header_logos(&event, &source, &Config::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(source.load_count(), 1);
    assert!(logos.event.is_none());
}

#[tokio::test]
async fn test_failed_event_logo_fails_the_image() {
    let source = MockLogoSource::failing_on("https://example.com/fondo.png");
    let result = load_header_logos(
        &create_cycling_event(),
        &source,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(Error::LogoLoad { .. })));
}

#[tokio::test]
async fn test_undecodable_logo_fails() {
    struct Garbage;

    #[async_trait]
    impl LogoSource for Garbage {
        async fn load(&self, _reference: &str) -> Result<Vec<u8>> {
            Ok(b"not an image".to_vec())
        }
    }

    let result = load_header_logos(
        &create_running_event(),
        &Garbage,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_logo_timeout() {
    let source = MockLogoSource::slow(Duration::from_secs(30));
    let config = Config::default().with_logo_timeout_secs(1);

    let result =
        load_header_logos(&create_running_event(), &source, &config, &CancellationToken::new())
            .await;

    assert!(matches!(result, Err(Error::LogoTimeout { seconds: 1 })));
}

#[tokio::test]
async fn test_cancelled_logo_loading() {
    let source = MockLogoSource::slow(Duration::from_secs(30));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result =
        load_header_logos(&create_running_event(), &source, &Config::default(), &cancel).await;

    assert!(matches!(result, Err(Error::ProcessingInterrupted { .. })));
}

#[tokio::test]
async fn test_render_rejects_before_loading_logos() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let source = MockLogoSource::immediate();

    let result = render_top10_image(
        &[],
        &create_running_event(),
        &elite(),
        &source,
        &fonts,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.unwrap_err().is_precondition());
    assert_eq!(source.load_count(), 0);
}

#[tokio::test]
async fn test_render_top10_image() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let records = create_large_category();
    let rows = filter_and_rank(&records, &elite(), "");
    let source = MockLogoSource::immediate();

    let image = render_top10_image(
        &rows,
        &create_cycling_event(),
        &elite(),
        &source,
        &fonts,
        &Config::default(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(image.file_name, "Top10_Gran_Fondo_Andino_Elite.png");
    assert_eq!(source.load_count(), 2);

    let pixmap = Pixmap::decode_png(&image.png).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (1080, 1600));

    // The column header band is orange
    let band = pixmap.pixel(590, 350).unwrap().demultiply();
    assert_eq!((band.red(), band.green(), band.blue()), (0xEA, 0x58, 0x0C));

    // Header band above the titles is white
    let header = pixmap.pixel(540, 5).unwrap().demultiply();
    assert_eq!((header.red(), header.green(), header.blue()), (255, 255, 255));

    // Below the tenth row the canvas stays white
    let blank = pixmap.pixel(540, 1500).unwrap().demultiply();
    assert_eq!((blank.red(), blank.green(), blank.blue()), (255, 255, 255));
}
