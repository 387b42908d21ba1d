use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

use commands::OptionsArgs;

#[derive(Parser)]
#[command(name = "fidx-cmd")]
#[command(about = "Command-line utility for building and querying delimited file indexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index one column of a source file and write the index file
    Create {
        /// Name of the index (becomes part of the index file name)
        #[arg(short, long)]
        name: String,

        /// Zero-based column to index
        #[arg(short, long)]
        column: usize,

        #[command(flatten)]
        options: OptionsArgs,

        /// Source file to index
        source: String,
    },

    /// Load an index and print the rows matching each key
    Seek {
        /// Name of the index
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        options: OptionsArgs,

        /// Source file the index was built for
        source: String,

        /// Key(s) to look up
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Load an index and display summary information
    Inspect {
        /// Name of the index
        #[arg(short, long)]
        name: String,

        /// Increase verbosity (-v lists every key with its row count)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        #[command(flatten)]
        options: OptionsArgs,

        /// Source file the index was built for
        source: String,
    },

    /// Compute every line's location and verify it by reading the bytes back
    Offsets {
        /// Assumed line terminator width in bytes
        #[arg(long, default_value_t = 2)]
        terminator_width: u64,

        /// Print every line, not only the mismatches
        #[arg(short, long)]
        verbose: bool,

        /// Source file to check
        source: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            name,
            column,
            options,
            source,
        } => commands::create::run(name, column, options, source),
        Commands::Seek {
            name,
            options,
            source,
            keys,
        } => commands::seek::run(name, options, source, keys),
        Commands::Inspect {
            name,
            verbose,
            options,
            source,
        } => commands::inspect::run(name, verbose, options, source),
        Commands::Offsets {
            terminator_width,
            verbose,
            source,
        } => commands::offsets::run(terminator_width, verbose, source),
    }
}
