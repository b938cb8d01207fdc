//! Race Results Processor Library
//!
//! A Rust library for turning race timing sheet exports into ranked results
//! and shareable reports.
//!
//! This library provides tools for:
//! - Parsing comma-delimited sheet exports into header-keyed records
//! - Normalizing event dates and deriving pace, speed and fastest-lap markers
//! - Filtering, searching and ranking athletes by category
//! - Composing printable HTML result documents grouped by category
//! - Rendering a 1080x1600 PNG of a category's Top 10 finishers

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod date_normalizer;
        pub mod derived_metrics;
        pub mod lap_analyzer;
        pub mod report_composer;
        pub mod results_query;
        pub mod tabular_parser;
    }
    pub mod adapters {
        pub mod logos;
        pub mod source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CategorySelection, DerivedAthleteView, Event, Record, Sport};
pub use config::Config;

/// Result type alias for the results processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for results processing operations
///
/// Parsing and derivation never fail: malformed values degrade to sentinels.
/// Errors are reserved for I/O, fetching sources, configuration and the
/// image rendering boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Fetching a remote source failed
    #[error("Failed to fetch '{location}': {message}")]
    SourceFetch { location: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Requested event does not exist in the events sheet
    #[error("Event not found: id = {event_id}")]
    EventNotFound { event_id: String },

    /// Operation rejected before any work started; the message is user-facing
    #[error("{message}")]
    Precondition { message: String },

    /// A logo could not be loaded or decoded
    #[error("Failed to load logo '{reference}': {message}")]
    LogoLoad { reference: String, message: String },

    /// Logo loading did not finish in time
    #[error("Timed out after {seconds}s waiting for logos to load")]
    LogoTimeout { seconds: u64 },

    /// No usable font for drawing text
    #[error("Font error: {message}")]
    Font { message: String },

    /// Canvas drawing or PNG encoding failed
    #[error("Image rendering error: {message}")]
    Render { message: String },

    /// Machine-readable output could not be produced
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a source fetch error
    pub fn source_fetch(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFetch {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an event not found error
    pub fn event_not_found(event_id: impl Into<String>) -> Self {
        Self::EventNotFound {
            event_id: event_id.into(),
        }
    }

    /// Create a precondition error carrying a user-facing notice
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create a logo load error
    pub fn logo_load(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LogoLoad {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a logo timeout error
    pub fn logo_timeout(seconds: u64) -> Self {
        Self::LogoTimeout { seconds }
    }

    /// Create a font error
    pub fn font(message: impl Into<String>) -> Self {
        Self::Font {
            message: message.into(),
        }
    }

    /// Create a rendering error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error is a user-facing precondition notice
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let location = error
            .url()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::SourceFetch {
            location,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
