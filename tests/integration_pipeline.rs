//! Integration tests for the results pipeline
//!
//! These tests run the sheets through the public API the way the CLI does:
//! read the exports from disk, pick an event, rank a category and produce
//! both artifacts.

use image::{GenericImageView, ImageOutputFormat, Rgba, RgbaImage};
use results_processor::app::adapters::logos::DefaultLogoSource;
use results_processor::app::adapters::source::{SheetSource, http_client};
use results_processor::app::services::report_composer::{
    FontSet, ReportVariant, compose_document, render_top10_image,
};
use results_processor::app::services::results_query::{
    categories_of, filter_and_rank, find_event, parse_events, select_for_event,
    sort_events_by_date,
};
use results_processor::app::services::tabular_parser::parse;
use results_processor::{CategorySelection, Config, DerivedAthleteView, Record, Sport};
use std::path::Path;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const EVENTS_SHEET: &str = "\
id evento,Nombre evento,Fecha,deporte,logo evento
MTB1,Rally Montañero,5/3/2023,ciclismo,
10K1,10K Ciudad Bolívar,12 mayo 2024,running,
TRI1,Duatlón del Orinoco,por definir,duatlon,
";

const RESULTS_SHEET: &str = "\
id evento,nombre,categoria,dorsal,club,tiempo,tiempo chip,Distancia,posición categoria,posición general,TV1,TV2
10K1,Carla Méndez,Libre Femenino,215,Corre Bolívar,0:42:30,0:42:21,10,1,4,21:40,20:50
10K1,José Rivas,Libre Masculino,108,,0:36:05,0:36:01,10,1,1,,
10K1,Daniela Soto,Libre Femenino,230,Corre Bolívar,0:44:10,0:44:02,10,2,7,,
MTB1,Pedro Lugo,Elite,12,Bike Club,2:00:00,,60,1,1,,
10K1,Luisa Marín,Libre Femenino,241,,0:51:00,0:50:40,10,DNF,,,
10K1,Mario Páez,Master,310,,0:47:12,0:47:00,10,1,9,,
";

fn write_sheets(dir: &Path) -> Config {
    let events = dir.join("eventos.csv");
    let results = dir.join("resultados.csv");
    std::fs::write(&events, EVENTS_SHEET).unwrap();
    std::fs::write(&results, RESULTS_SHEET).unwrap();

    Config::default()
        .with_events_source(events.to_string_lossy())
        .with_results_source(results.to_string_lossy())
}

fn write_logo(path: &Path) {
    let logo = RgbaImage::from_pixel(80, 40, Rgba([255, 90, 31, 255]));
    let mut file = std::fs::File::create(path).unwrap();
    logo.write_to(&mut file, ImageOutputFormat::Png).unwrap();
}

async fn load(config: &Config) -> (Vec<results_processor::Event>, Vec<Record>) {
    let source = SheetSource::new(5).unwrap();
    let events = parse(&source.fetch_text(&config.sources.events).await.unwrap());
    let results = parse(&source.fetch_text(&config.sources.results).await.unwrap());

    let mut events = parse_events(&events);
    sort_events_by_date(&mut events);
    (events, results)
}

#[tokio::test]
async fn test_events_are_listed_most_recent_first() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path());

    let (events, _) = load(&config).await;
    let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();

    // Unparseable dates sort last
    assert_eq!(ids, vec!["10K1", "MTB1", "TRI1"]);
    assert_eq!(events[0].sport_kind(), Sport::Running);
}

#[tokio::test]
async fn test_category_ranking_for_an_event() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path());
    let (events, results) = load(&config).await;

    let event = find_event(&events, "10K1").unwrap();
    let rows = select_for_event(&results, &event.id);
    assert_eq!(rows.len(), 5);
    assert_eq!(
        categories_of(&rows),
        vec!["Libre Femenino", "Libre Masculino", "Master"]
    );

    let women = CategorySelection::Named("Libre Femenino".to_string());
    let ranked = filter_and_rank(&rows, &women, "");
    let names: Vec<&str> = ranked.iter().filter_map(|record| record.name()).collect();
    assert_eq!(names, vec!["Carla Méndez", "Daniela Soto", "Luisa Marín"]);

    let searched = filter_and_rank(&rows, &CategorySelection::All, "23");
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].bib_number(), Some("230"));

    let view = DerivedAthleteView::derive(ranked[0], event.sport_kind());
    assert_eq!(view.pace_or_speed, "4:15");
    assert_eq!(view.fastest_lap_key, Some("TV2"));
}

#[tokio::test]
async fn test_full_report_document() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path());
    let (events, results) = load(&config).await;

    let event = find_event(&events, "10K1").unwrap();
    let rows = select_for_event(&results, &event.id);
    let html = compose_document(
        &rows,
        event,
        "Todas las Categorías",
        ReportVariant::Full,
        &config,
    );

    assert!(html.contains("<h2>Resultados de 10K Ciudad Bolívar</h2>"));
    assert_eq!(html.matches("class=\"category-title\"").count(), 3);
    assert!(html.contains("<td>20:50 (PR)</td>"));
    assert!(!html.contains("Pedro Lugo"));

    let output = dir.path().join("reporte.html");
    std::fs::write(&output, &html).unwrap();
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}

#[tokio::test]
async fn test_top10_image_from_local_logo() {
    let fonts = match FontSet::load_system(None) {
        Ok(fonts) => fonts,
        Err(e) => {
            println!("Skipping Top 10 rendering, no usable system font: {}", e);
            return;
        }
    };

    let dir = TempDir::new().unwrap();
    let logo = dir.path().join("logo.png");
    write_logo(&logo);
    let config = write_sheets(dir.path()).with_brand_logo(logo.to_string_lossy());
    let (events, results) = load(&config).await;

    let event = find_event(&events, "MTB1").unwrap();
    let rows = select_for_event(&results, &event.id);
    let elite = CategorySelection::Named("Elite".to_string());
    let entries = filter_and_rank(&rows, &elite, "");

    let logo_source = DefaultLogoSource::new(http_client(5).unwrap());
    let top10 = render_top10_image(
        &entries,
        event,
        &elite,
        &logo_source,
        &fonts,
        &config,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(top10.file_name, "Top10_Rally_Montañero_Elite.png");
    let decoded = image::load_from_memory(&top10.png).unwrap();
    assert_eq!(GenericImageView::dimensions(&decoded), (1080, 1600));
}
