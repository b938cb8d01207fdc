//! Application constants for the results processor
//!
//! This module contains the sheet column names, selector sentinels, report
//! labels and layout dimensions used throughout the results processor.

// =============================================================================
// Source Sheet Format
// =============================================================================

/// The only supported field delimiter. Quoting and escaping are not supported.
pub const FIELD_DELIMITER: char = ',';

/// Fixed upper bound on per-athlete lap columns (TV1..TV11)
pub const MAX_LAPS: usize = 11;

/// Prefix of the per-lap columns; the lap number follows directly
pub const LAP_FIELD_PREFIX: &str = "TV";

/// Suffix appended to an athlete's fastest lap
pub const PERSONAL_RECORD_MARKER: &str = " (PR)";

/// Placeholder for absent or underivable values
pub const PLACEHOLDER: &str = "-";

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names of the results sheet
pub mod fields {
    // Identity columns
    pub const EVENT_ID: &str = "id evento";
    pub const NAME: &str = "nombre";
    pub const CATEGORY: &str = "categoria";
    pub const BIB_NUMBER: &str = "dorsal";
    pub const CLUB: &str = "club";
    pub const SPORT: &str = "deporte";

    // Timing columns
    pub const DURATION: &str = "tiempo";
    pub const CHIP_DURATION: &str = "tiempo chip";
    pub const DISTANCE: &str = "Distancia";
    pub const LAPS_SUMMARY: &str = "VUELTAS";

    // Ranking columns
    pub const CATEGORY_RANK: &str = "posición categoria";
    pub const OVERALL_RANK: &str = "posición general";
    pub const GENDER_RANK: &str = "posición genero";

    // Asset columns
    pub const PHOTO_URL: &str = "foto_url";
    pub const CERTIFICATE_URL: &str = "certificado_url";

    /// Per-lap columns in lap order
    pub const LAPS: [&str; super::MAX_LAPS] = [
        "TV1", "TV2", "TV3", "TV4", "TV5", "TV6", "TV7", "TV8", "TV9", "TV10", "TV11",
    ];

    /// Columns that have a dedicated place in an athlete card and are therefore
    /// left out of the expanded details view
    pub const DETAILS_EXCLUDED: &[&str] = &[
        PHOTO_URL,
        NAME,
        BIB_NUMBER,
        CATEGORY_RANK,
        DURATION,
        EVENT_ID,
        CATEGORY,
        CERTIFICATE_URL,
        DISTANCE,
        GENDER_RANK,
        OVERALL_RANK,
        CLUB,
        SPORT,
        LAPS_SUMMARY,
        "TV1",
        "TV2",
        "TV3",
        "TV4",
        "TV5",
        "TV6",
        "TV7",
        "TV8",
        "TV9",
        "TV10",
        "TV11",
    ];
}

/// Column names of the events sheet
pub mod event_fields {
    pub const ID: &str = "id evento";
    pub const NAME: &str = "Nombre evento";
    pub const DATE: &str = "Fecha";
    pub const SPORT: &str = "deporte";
    pub const LOGO: &str = "logo evento";
}

/// Column names of the registrations sheet
pub mod registration_fields {
    pub const EVENT: &str = "event";
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const STATUS: &str = "status";
}

// =============================================================================
// Selector Sentinels and Labels
// =============================================================================

/// Category selector value meaning "no category chosen yet"
pub const CATEGORY_UNSELECTED: &str = "";

/// Category selector value meaning "every category"
pub const CATEGORY_ALL: &str = "Todas";

/// Display text of the unselected category option
pub const CATEGORY_UNSELECTED_LABEL: &str = "Selecciona una categoría";

/// Sport selector value meaning "every sport"
pub const SPORT_ALL: &str = "Todos";

/// Sport label that selects pace instead of speed
pub const RUNNING_SPORT: &str = "running";

/// Group label for records without a category inside a document
pub const UNCATEGORIZED_LABEL: &str = "Sin Categoría";

/// Report label for the full listing
pub const FULL_REPORT_LABEL: &str = "Todas las Categorías";

/// Report label for the per-category excerpt
pub const TOP5_REPORT_LABEL: &str = "Top 5 por Categoría";

/// Rows kept per category in the excerpt report
pub const TOP5_LIMIT: usize = 5;

/// Entries drawn on the Top 10 image
pub const TOP10_LIMIT: usize = 10;

/// Registration status values of the registrations sheet
pub mod registration_status {
    pub const REGISTERED: &str = "Inscrito";
    pub const PENDING: &str = "Pendiente";
}

// =============================================================================
// Branding Defaults
// =============================================================================

/// Brand name shown in every artifact header
pub const DEFAULT_BRAND_NAME: &str = "R&C Sports Timing";

/// Brand logo, drawn on every artifact
pub const DEFAULT_BRAND_LOGO: &str =
    "https://res.cloudinary.com/ddlhr4nyn/image/upload/v1748903884/LOGO_R_C_SOPRTS_TIMING_em93hv.png";

/// Contact link of the document footer
pub const DEFAULT_CONTACT_LINK: &str = "https://api.whatsapp.com/send?phone=584249065422&text=Hola%20buen%20d%C3%ADa!%20mi%20nombre%20es%20";

/// Contact link caption of the document footer
pub const DEFAULT_CONTACT_LABEL: &str = "WhatsApp +584249065422";

/// Published events sheet
pub const DEFAULT_EVENTS_SOURCE: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQWjDAx17rze56_4sq8mIxro5u1-lTVS6MYe3v6wDqrbG12ARK3b_lPI387qJIfl56fCjHaHEHXQsfi/pub?gid=749744378&single=true&output=csv";

/// Published results sheet
pub const DEFAULT_RESULTS_SOURCE: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQWjDAx17rze56_4sq8mIxro5u1-lTVS6MYe3v6wDqrbG12ARK3b_lPI387qJIfl56fCjHaHEHXQsfi/pub?gid=0&single=true&output=csv";

// =============================================================================
// Top 10 Image Layout
// =============================================================================

/// Canvas geometry and typography of the Top 10 image
pub mod image_layout {
    pub const WIDTH: u32 = 1080;
    pub const HEIGHT: u32 = 1600;

    /// Header band height
    pub const HEADER_HEIGHT: f32 = 150.0;

    /// Logos are drawn as squares of this side
    pub const LOGO_SIZE: u32 = 100;
    pub const LOGO_MARGIN: f32 = 50.0;
    pub const LOGO_TOP: f32 = 25.0;

    // Baselines of the title lines
    pub const BRAND_BASELINE: f32 = 70.0;
    pub const EVENT_BASELINE: f32 = 120.0;
    pub const CATEGORY_BASELINE: f32 = 200.0;
    pub const DATE_BASELINE: f32 = 260.0;
    pub const COLUMN_HEADER_BASELINE: f32 = 340.0;
    pub const FIRST_ROW_BASELINE: f32 = 380.0;

    /// Vertical advance between entry rows
    pub const ROW_STEP: f32 = 50.0;

    /// Column header band, relative to its baseline
    pub const COLUMN_BAND_OFFSET: f32 = 35.0;
    pub const COLUMN_BAND_HEIGHT: f32 = 50.0;

    // Column anchors. Position, bib, time and pace are centered on their
    // anchor; name and club start at theirs.
    pub const COL_POSITION: f32 = 100.0;
    pub const COL_BIB: f32 = 250.0;
    pub const COL_NAME: f32 = 480.0;
    pub const COL_CLUB: f32 = 700.0;
    pub const COL_TIME: f32 = 850.0;
    pub const COL_PACE: f32 = 1000.0;

    /// Gap kept between a left-aligned column and the next anchor
    pub const COLUMN_GUTTER: f32 = 20.0;

    pub const NAME_MAX_WIDTH: f32 = COL_CLUB - COL_NAME - COLUMN_GUTTER;
    pub const CLUB_MAX_WIDTH: f32 = COL_TIME - COL_CLUB - COLUMN_GUTTER;

    // Font sizes in pixels
    pub const BRAND_FONT_SIZE: f32 = 48.0;
    pub const EVENT_FONT_SIZE: f32 = 36.0;
    pub const CATEGORY_FONT_SIZE: f32 = 40.0;
    pub const DATE_FONT_SIZE: f32 = 28.0;
    pub const COLUMN_HEADER_FONT_SIZE: f32 = 28.0;
    pub const CELL_FONT_SIZE: f32 = 24.0;
    pub const NAME_FONT_SIZE: f32 = 28.0;

    /// Appended once a value is trimmed to fit its column
    pub const ELLIPSIS: &str = "...";
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Column name of the lap with the given 1-based number
pub fn lap_field(lap_number: usize) -> String {
    format!("{}{}", LAP_FIELD_PREFIX, lap_number)
}
