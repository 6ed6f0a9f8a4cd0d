//! userdata CLI - validate user-data records and print normalized profiles
//!
//! ## Commands
//!
//! ### (none) - Print the startup banner
//! Prints `Application started` followed by `Hello, World!`.
//!
//! ### `process` - Process a JSON record
//! Reads one JSON object from a file, or from stdin when the path is `-` or
//! omitted. A literal `null` counts as "no input". Prints
//! `{"success": false, "errors": [...]}`, `{"success": true, "data": {...}}`,
//! or `null`.
//!
//! ### `stats` - Summarize numbers
//! Prints count, average, max and min as JSON.
//!
//! ### `greet` - Print a greeting
//!
//! ## Configuration
//!
//! Settings are read from `userdata.yaml` in the current directory, or from the
//! file given with `--config`.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Control logging verbosity (e.g., `info`, `debug`, `trace`)
//!
//! ## Examples
//!
//! ```bash
//! userdata process user.json
//! echo '{"name":"Ann","email":"a@b.com","age":25}' | userdata process --compact
//! userdata stats 1 5 3 9 2 6
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use userdata_processor::{
    greet,
    greeting::STARTUP_BANNER,
    init_logging,
    summarize,
    Config,
    UserDataProcessor,
    UserInput,
};

#[derive(Parser)]
#[command(author, version, about = "Validate user-data records and print normalized profiles", long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON user record and print the result
    Process {
        /// JSON file to read ("-" or omitted reads stdin)
        input: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print count, average, max and min of the given numbers
    Stats {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },

    /// Print a greeting for NAME
    Greet {
        name: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn read_input(path: Option<&Path>) -> Result<Option<UserInput>> {
    let raw = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("Failed to parse user record")
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let counter = init_logging(&config.logging)?;
    debug!("userdata starting");

    match cli.command {
        Some(Commands::Process { input, compact }) => {
            let record = read_input(input.as_deref())?;
            let processor = UserDataProcessor::new().with_config(config.processor.clone());
            let result = processor.process(record.as_ref());
            print_json(&result, compact)?;
        }

        Some(Commands::Stats { numbers }) => {
            print_json(&summarize(&numbers), false)?;
        }

        Some(Commands::Greet { name }) => {
            println!("{}", greet(&name));
        }

        None => {
            println!("{}", STARTUP_BANNER);
            println!("{}", greet("World"));
        }
    }

    if let Some(summary) = counter.summary() {
        info!("Run finished with {}", summary);
    }
    debug!("userdata shutting down");
    Ok(())
}
