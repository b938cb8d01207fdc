//! Shared fixtures for report composition tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageOutputFormat, RgbaImage};

use crate::app::adapters::logos::LogoSource;
use crate::app::models::{Event, Record};
use crate::app::services::tabular_parser::parse;
use crate::{Error, Result};

mod top10_tests;

/// Results of a running event with lap splits on some rows
pub fn create_running_results() -> Vec<Record> {
    parse(
        r#"id evento,nombre,categoria,dorsal,club,tiempo,tiempo chip,Distancia,posición categoria,posición general,TV1,TV2,TV3
E1,Ana Pérez,Libre Femenino,101,Trotadores,0:45:10,0:45:02,10,2,5,15:10,14:50,15:10
E1,Luis Gómez,Libre Masculino,102,Club Andes,0:41:02,0:40:58,10,1,1,,,
E1,Sofía Lara,Libre Femenino,104,,0:44:00,0:43:55,10,1,3,,,
E1,Invitado,,999,,0:50:00,,10,,,,,
E1,Marta Ruiz,Libre Femenino,103,Trotadores,0:47:55,0:47:40,10,DNF,,,,
"#,
    )
}

/// Seven ranked athletes of one category
pub fn create_large_category() -> Vec<Record> {
    let mut text = String::from("id evento,nombre,categoria,dorsal,tiempo,Distancia,posición categoria\n");
    for rank in (1..=7).rev() {
        text.push_str(&format!(
            "E1,Atleta {rank},Elite,{},0:{}:00,10,{rank}\n",
            200 + rank,
            30 + rank
        ));
    }
    parse(&text)
}

pub fn create_running_event() -> Event {
    Event {
        id: "E1".to_string(),
        name: "10K San Celestino".to_string(),
        date: "12 mayo 2024".to_string(),
        sport: "running".to_string(),
        logo: None,
    }
}

pub fn create_cycling_event() -> Event {
    Event {
        id: "E2".to_string(),
        name: "Gran Fondo Andino".to_string(),
        date: String::new(),
        sport: "Ciclismo".to_string(),
        logo: Some("https://example.com/fondo.png".to_string()),
    }
}

/// A small solid PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, image::Rgba([234, 88, 12, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}

/// Logo source answering every reference with a PNG after an optional delay
pub struct MockLogoSource {
    pub delay: Duration,
    pub fail_on: Option<String>,
    pub loads: AtomicUsize,
}

impl MockLogoSource {
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            fail_on: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::immediate()
        }
    }

    pub fn failing_on(reference: &str) -> Self {
        Self {
            fail_on: Some(reference.to_string()),
            ..Self::immediate()
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogoSource for MockLogoSource {
    async fn load(&self, reference: &str) -> Result<Vec<u8>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_on.as_deref() == Some(reference) {
            return Err(Error::logo_load(reference, "mock failure"));
        }
        Ok(png_bytes(64, 32))
    }
}
