use clap::Parser;
use ogec_admin::cli::{args::Args, commands};
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
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(ogec_admin::Error::processing_interrupted("Interrupted by user").into())
            }
        }
    });

    // Dropping the runtime releases any staged downloads still pending
    drop(runtime);

    match result {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("OGEC Admin - dashboard records import/export");
    println!("============================================");
    println!();
    println!("Export dashboard records as quoted CSV and import CSV uploads");
    println!("back into JSON records.");
    println!();
    println!("USAGE:");
    println!("    ogec-admin <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    export    Export records (JSON input or --preset) to a CSV file");
    println!("    import    Import a CSV file into JSON records");
    println!();
    println!("EXAMPLES:");
    println!("    ogec-admin export --input members.json --columns name:Name,role:Role -f members.csv");
    println!("    ogec-admin export --preset org-content -o exports/");
    println!("    ogec-admin import children.csv --pretty -o children.json");
    println!();
    println!("Run 'ogec-admin <COMMAND> --help' for command options.");
}
