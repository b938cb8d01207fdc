use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use results_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };
    let command_name = command.name();
    let quiet = command.common().quiet;

    // Create async runtime and run the command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(command, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(results_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result.with_context(|| format!("{} command failed", command_name)) {
        Ok(summary) => {
            if !quiet && !summary.files_written.is_empty() {
                eprintln!(
                    "{} {} file(s), {} in {:.2}s",
                    "Done:".dimmed(),
                    summary.files_written.len(),
                    commands::CommandSummary::format_size(summary.total_output_size()),
                    summary.elapsed.as_secs_f64()
                );
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Results Processor - R&C Sports Timing");
    println!("=====================================");
    println!();
    println!("Rank race results by category and produce printable result documents");
    println!("and Top 10 images from the published timing sheets.");
    println!();
    println!("USAGE:");
    println!("    results-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    events       List events, most recent first");
    println!("    results      List ranked results of one event");
    println!("    report       Write the printable HTML result document of an event");
    println!("    image        Write the Top 10 PNG of one category");
    println!("    registered   List registrations with their status");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Running events only:");
    println!("    results-processor events --sport running");
    println!();
    println!("    # One category of an event, searching by name or bib:");
    println!("    results-processor results --event E12 --category \"Libre Femenino\" --search ana");
    println!();
    println!("    # Top 5 per category, printed in portrait:");
    println!("    results-processor report --event E12 --variant top5 --orientation portrait");
    println!();
    println!("    # Top 10 image of one category:");
    println!("    results-processor image --event E12 --category Elite --output-dir imagenes");
    println!();
    println!("For detailed help on any command, use:");
    println!("    results-processor <COMMAND> --help");
}
