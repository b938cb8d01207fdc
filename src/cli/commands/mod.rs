//! Command implementations for the results processor CLI
//!
//! This module contains the command execution logic. Each command is
//! implemented in its own module:
//! - `events`: Event listing with name and sport filters
//! - `results`: Ranked results of one event
//! - `report`: Printable HTML result document
//! - `image`: Top 10 PNG of one category
//! - `registered`: Registration listing

pub mod events;
pub mod image;
pub mod registered;
pub mod report;
pub mod results;
pub mod shared;

pub use shared::CommandSummary;

use crate::cli::args::Commands;
use crate::Result;
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand handler
pub async fn run(command: Commands, cancel: CancellationToken) -> Result<CommandSummary> {
    match command {
        Commands::Events(args) => events::run_events(args, cancel).await,
        Commands::Results(args) => results::run_results(args, cancel).await,
        Commands::Report(args) => report::run_report(args, cancel).await,
        Commands::Image(args) => image::run_image(args, cancel).await,
        Commands::Registered(args) => registered::run_registered(args, cancel).await,
    }
}
