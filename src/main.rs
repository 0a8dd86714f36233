use brahms_sync::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        // Dropping the command future cancels every row still in flight
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping sync...");
                Err(brahms_sync::Error::processing_interrupted(
                    "Sync interrupted by user"
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BRAHMS Sync - Red Butte Garden plant API loader");
    println!("===============================================");
    println!();
    println!("Push BRAHMS living-collection and species image exports to the");
    println!("Red Butte Garden plant API.");
    println!();
    println!("USAGE:");
    println!("    brahms-sync <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    sync        Sync exports to the plant API (main command)");
    println!("    validate    Check exports offline and report rejected rows");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("CREDENTIALS:");
    println!("    RBG_API_USERNAME and RBG_API_PASSWORD must be set for sync.");
    println!();
    println!("EXAMPLES:");
    println!("    # Sync rows modified since the last run:");
    println!("    brahms-sync sync --plant-data-path living_collections.csv \\");
    println!("                     --image-data-path species_images.txt");
    println!();
    println!("    # Resync everything against a local development server:");
    println!("    brahms-sync sync -p living_collections.csv --target localhost:8000 \\");
    println!("                     --no-ssl --full-sync");
    println!();
    println!("    # Check a windows-1252 export before syncing:");
    println!("    brahms-sync validate -p living_collections.csv --encoding windows-1252");
    println!();
    println!("For detailed help on any command, use:");
    println!("    brahms-sync <COMMAND> --help");
}
