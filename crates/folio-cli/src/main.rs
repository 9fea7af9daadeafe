//! Folio CLI - Import a folder as prioritised text context.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Folio - Import a folder as conversation context
#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Import a folder as conversation context", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a folder and print the resulting conversation as JSON
    Import {
        /// Folder to import
        path: String,

        /// Write the conversation to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the number of files processed per batch
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Show which files an import would consider, in import order
    Scan {
        /// Folder to scan
        path: String,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., import.chunk_size)
        key: String,

        /// Value to set
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Import {
            path,
            output,
            chunk_size,
        } => commands::import::run(&path, output, chunk_size, config_path),
        Commands::Scan { path } => commands::scan::run(&path, config_path),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(config_path),
            ConfigCommands::Init => commands::config::init(config_path),
            ConfigCommands::Path => commands::config::path(config_path),
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value, config_path),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
