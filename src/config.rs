//! Configuration management and validation.
//!
//! Provides the branding, document, image and source settings of the results
//! processor. Settings are layered: built-in defaults, then a TOML file, then
//! environment variables, then command-line flags.

use crate::constants::{
    DEFAULT_BRAND_LOGO, DEFAULT_BRAND_NAME, DEFAULT_CONTACT_LABEL, DEFAULT_CONTACT_LINK,
    DEFAULT_EVENTS_SOURCE, DEFAULT_RESULTS_SOURCE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the events sheet location
pub const ENV_EVENTS_SOURCE: &str = "RESULTS_EVENTS_SOURCE";

/// Environment variable overriding the results sheet location
pub const ENV_RESULTS_SOURCE: &str = "RESULTS_RESULTS_SOURCE";

/// Environment variable overriding the logo loading timeout
pub const ENV_LOGO_TIMEOUT_SECS: &str = "RESULTS_LOGO_TIMEOUT_SECS";

/// Brand identity drawn on every artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Brand name in artifact headers
    pub name: String,

    /// Brand logo URL or local path
    pub logo: String,

    /// Contact link of the document footer
    pub contact_link: String,

    /// Caption of the contact link
    pub contact_label: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BRAND_NAME.to_string(),
            logo: DEFAULT_BRAND_LOGO.to_string(),
            contact_link: DEFAULT_CONTACT_LINK.to_string(),
            contact_label: DEFAULT_CONTACT_LABEL.to_string(),
        }
    }
}

/// Printed page orientation of the result document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Landscape,
    Portrait,
}

impl PageOrientation {
    /// CSS `@page` size value
    pub fn css_page_size(self) -> &'static str {
        match self {
            PageOrientation::Landscape => "A4 landscape",
            PageOrientation::Portrait => "A4 portrait",
        }
    }
}

/// Result document settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub orientation: PageOrientation,
}

/// Top 10 image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Seconds to wait for both logos before giving up
    pub logo_timeout_secs: u64,

    /// Preferred font family; the system sans-serif face is used otherwise
    pub font_family: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            logo_timeout_secs: 20,
            font_family: None,
        }
    }
}

/// Locations of the upstream sheets, as URLs or local paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub events: String,
    pub results: String,

    /// Registrations sheet; there is no published default
    pub registrations: Option<String>,

    /// Seconds allowed for fetching one remote sheet
    pub fetch_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS_SOURCE.to_string(),
            results: DEFAULT_RESULTS_SOURCE.to_string(),
            registrations: None,
            fetch_timeout_secs: 30,
        }
    }
}

/// Global configuration for the results processor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub branding: BrandingConfig,
    pub document: DocumentConfig,
    pub image: ImageConfig,
    pub sources: SourcesConfig,
}

impl Config {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("results-processor").join("config.toml"))
    }

    /// Load configuration from an explicit file, or the default location
    ///
    /// An explicit path must exist. A missing default file just means
    /// defaults. Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        let config = Self::from_toml(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text; missing keys keep their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply environment-style overrides from a lookup function
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(events) = lookup(ENV_EVENTS_SOURCE) {
            debug!("{} overrides the events source", ENV_EVENTS_SOURCE);
            self.sources.events = events;
        }
        if let Some(results) = lookup(ENV_RESULTS_SOURCE) {
            debug!("{} overrides the results source", ENV_RESULTS_SOURCE);
            self.sources.results = results;
        }
        if let Some(timeout) = lookup(ENV_LOGO_TIMEOUT_SECS) {
            self.image.logo_timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_LOGO_TIMEOUT_SECS, timeout
                ))
            })?;
        }
        Ok(self)
    }

    /// Check the configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.branding.name.trim().is_empty() {
            return Err(Error::configuration("branding.name must not be empty"));
        }
        if self.branding.logo.trim().is_empty() {
            return Err(Error::configuration("branding.logo must not be empty"));
        }
        if self.image.logo_timeout_secs == 0 {
            return Err(Error::configuration(
                "image.logo_timeout_secs must be greater than 0",
            ));
        }
        if self.sources.fetch_timeout_secs == 0 {
            return Err(Error::configuration(
                "sources.fetch_timeout_secs must be greater than 0",
            ));
        }
        if self.sources.events.trim().is_empty() || self.sources.results.trim().is_empty() {
            return Err(Error::configuration(
                "sources.events and sources.results must not be empty",
            ));
        }
        Ok(())
    }

    /// Set the events sheet location
    pub fn with_events_source(mut self, source: impl Into<String>) -> Self {
        self.sources.events = source.into();
        self
    }

    /// Set the results sheet location
    pub fn with_results_source(mut self, source: impl Into<String>) -> Self {
        self.sources.results = source.into();
        self
    }

    /// Set the registrations sheet location
    pub fn with_registrations_source(mut self, source: impl Into<String>) -> Self {
        self.sources.registrations = Some(source.into());
        self
    }

    /// Set the page orientation of the result document
    pub fn with_orientation(mut self, orientation: PageOrientation) -> Self {
        self.document.orientation = orientation;
        self
    }

    /// Set the logo loading timeout
    pub fn with_logo_timeout_secs(mut self, seconds: u64) -> Self {
        self.image.logo_timeout_secs = seconds;
        self
    }

    /// Set the brand logo reference
    pub fn with_brand_logo(mut self, logo: impl Into<String>) -> Self {
        self.branding.logo = logo.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.branding.name, "R&C Sports Timing");
        assert_eq!(config.image.logo_timeout_secs, 20);
        assert_eq!(config.document.orientation, PageOrientation::Landscape);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [document]
            orientation = "portrait"

            [image]
            logo_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.document.orientation, PageOrientation::Portrait);
        assert_eq!(config.image.logo_timeout_secs, 5);
        assert_eq!(config.branding, BrandingConfig::default());
        assert_eq!(config.sources.events, DEFAULT_EVENTS_SOURCE);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = Config::from_toml("[image]\nlogo_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sources]\nresults = \"resultados.csv\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.sources.results, "resultados.csv");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_EVENTS_SOURCE, "eventos.csv"),
            (ENV_LOGO_TIMEOUT_SECS, " 7 "),
        ]);

        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.sources.events, "eventos.csv");
        assert_eq!(config.sources.results, DEFAULT_RESULTS_SOURCE);
        assert_eq!(config.image.logo_timeout_secs, 7);
    }

    #[test]
    fn test_invalid_timeout_override() {
        let result = Config::default().with_overrides(|key| {
            (key == ENV_LOGO_TIMEOUT_SECS).then(|| "veinte".to_string())
        });
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config::default().with_logo_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_size() {
        assert_eq!(PageOrientation::Landscape.css_page_size(), "A4 landscape");
        assert_eq!(PageOrientation::Portrait.css_page_size(), "A4 portrait");
    }
}
