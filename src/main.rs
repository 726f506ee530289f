// src/main.rs

//! The main entry point for the `spineljson` command-line tool.

use spineljson::cli::{self, CliCommand};
use spineljson::config::Config;
use std::env;
use tracing::error;
use tracing_subscriber::{filter::EnvFilter, prelude::*};

const USAGE: &str = "Usage: spineljson [--config <file>] <command> <file> <path> [json]

Commands:
  get <file> <path>               Print the value at <path>
  type <file> <path>              Print the type tag of the value at <path>
  set <file> <path> <json>        Overwrite or add the value at <path>
  set-create <file> <path> <json> Like set, creating missing objects along <path>
  del <file> <path>               Remove the value at <path> and print it";

fn main() {
    // Define version information.
    const VERSION: &str = env!("SPINELJSON_BUILD_VERSION");

    let args: Vec<String> = env::args().skip(1).collect();

    // Handle the --version and --help flags.
    if args.iter().any(|a| a == "--version") {
        println!("spineljson version {VERSION}");
        return;
    }
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return;
    }

    // Split out the optional --config flag; everything else is positional.
    let mut config_path = None;
    let mut positional = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("--config flag requires a value");
                    std::process::exit(1);
                }
            }
        } else {
            positional.push(arg);
        }
    }

    // The tool cannot run with a broken configuration, so report and exit.
    let config = match Config::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    // Logs go to stderr so command output on stdout stays machine-readable.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let command = match CliCommand::parse(&positional) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    match cli::execute(&command, &config) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
