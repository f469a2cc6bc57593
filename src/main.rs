use ang_scan::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ang_scan - EBSD .ang orientation map reader");
    println!("===========================================");
    println!();
    println!("USAGE:");
    println!("    ang_scan <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    info     Print the header, phases and a sample of the point data of one scan");
    println!("    check    Read every .ang file under the given paths and report failures");
    println!("    help     Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Only log warnings and errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    ang_scan info scan.ang");
    println!("    ang_scan info scan.ang --strategy buffered --points 10");
    println!("    ang_scan check scans/ --format json");
}
