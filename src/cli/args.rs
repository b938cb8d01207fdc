//! Command-line argument definitions for the results processor
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every subcommand flattens [`CommonArgs`] for logging, configuration and
//! source overrides.

use crate::app::services::report_composer::ReportVariant;
use crate::config::PageOrientation;
use crate::constants::SPORT_ALL;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the race results processor
///
/// Reads the events and results sheets, ranks athletes by category and writes
/// printable result documents and Top 10 images.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "results-processor",
    version,
    about = "Rank race results by category and produce printable reports and Top 10 images",
    long_about = "Reads the published events and results sheets of a timing company, derives \
                  pace or speed and fastest laps for every athlete, ranks athletes within their \
                  category and writes a printable HTML result document or a 1080x1600 PNG of a \
                  category's Top 10."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List events, most recent first
    Events(EventsArgs),
    /// List ranked results of one event
    Results(ResultsArgs),
    /// Write the printable HTML result document of an event
    Report(ReportArgs),
    /// Write the Top 10 PNG of one category
    Image(ImageArgs),
    /// List registrations with their status
    Registered(RegisteredArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/results-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Events sheet location, overriding the configuration
    #[arg(long = "events-source", value_name = "URL|PATH")]
    pub events_source: Option<String>,

    /// Results sheet location, overriding the configuration
    #[arg(long = "results-source", value_name = "URL|PATH")]
    pub results_source: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for listings
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the events command
#[derive(Debug, Clone, Parser)]
pub struct EventsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep events whose name contains this text (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Keep events of one sport
    #[arg(long = "sport", value_name = "SPORT", default_value = SPORT_ALL)]
    pub sport: String,
}

/// Arguments for the results command
#[derive(Debug, Clone, Parser)]
pub struct ResultsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Event identifier from the events sheet
    #[arg(short = 'e', long = "event", value_name = "ID")]
    pub event: String,

    /// Show one category
    #[arg(long = "category", value_name = "NAME", conflicts_with = "all")]
    pub category: Option<String>,

    /// Show every category
    #[arg(long = "all")]
    pub all: bool,

    /// Keep athletes whose bib or name contains this text (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Show the expanded details of every athlete
    #[arg(long = "details")]
    pub details: bool,
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Event identifier from the events sheet
    #[arg(short = 'e', long = "event", value_name = "ID")]
    pub event: String,

    /// Which rows the document lists
    #[arg(long = "variant", value_enum, default_value = "full")]
    pub variant: ReportVariant,

    /// Category of a single-category report
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Keep athletes whose bib or name contains this text (single-category only)
    #[arg(short = 's', long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Printed page orientation, overriding the configuration
    #[arg(long = "orientation", value_enum)]
    pub orientation: Option<PageOrientation>,

    /// Output HTML file
    ///
    /// If not specified, the document is written to the current directory
    /// under a name derived from the event and report label.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the image command
#[derive(Debug, Clone, Parser)]
pub struct ImageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Event identifier from the events sheet
    #[arg(short = 'e', long = "event", value_name = "ID")]
    pub event: String,

    /// Category to draw
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Keep athletes whose bib or name contains this text before ranking
    #[arg(short = 's', long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Directory receiving the PNG
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Seconds to wait for logos, overriding the configuration
    #[arg(long = "logo-timeout", value_name = "SECONDS")]
    pub logo_timeout_secs: Option<u64>,
}

/// Arguments for the registered command
#[derive(Debug, Clone, Parser)]
pub struct RegisteredArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Registrations sheet location, overriding the configuration
    #[arg(long = "source", value_name = "URL|PATH")]
    pub source: Option<String>,
}

/// Output format options for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Events(args) => &args.common,
            Commands::Results(args) => &args.common,
            Commands::Report(args) => &args.common,
            Commands::Image(args) => &args.common,
            Commands::Registered(args) => &args.common,
        }
    }

    /// Subcommand name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Events(_) => "events",
            Commands::Results(_) => "results",
            Commands::Report(_) => "report",
            Commands::Image(_) => "image",
            Commands::Registered(_) => "registered",
        }
    }
}

impl CommonArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

impl ReportArgs {
    /// Validate the report arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if self.variant == ReportVariant::SingleCategory && self.category.is_none() {
            return Err(Error::configuration(
                "--category is required with --variant category",
            ));
        }
        Ok(())
    }
}

impl ImageArgs {
    /// Validate the image arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }
        if self.logo_timeout_secs == Some(0) {
            return Err(Error::configuration(
                "Logo timeout must be greater than 0 seconds",
            ));
        }
        Ok(())
    }
}
