//! # Vellum CLI Tool
//!
//! Command-line administration interface for Vellum CMS. Provides cache
//! clearing across the configured drivers and bulk template deletion.

mod cli;

use std::path::Path;

use clap::{Parser, Subcommand};
use vellum_client::ClientResult;
use vellum_shared::AdminConfig;

use cli::{handle_cache_command, handle_template_command};

#[derive(Parser, Debug)]
#[command(name = "vellum-cli")]
#[command(about = "Administration command-line interface for Vellum CMS")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: vellum.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cache administration operations
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Template administration operations
    #[command(subcommand)]
    Template(TemplateCommands),
}

#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Clear cached items, tags, or whole drivers
    Clear {
        /// Item paths to clear (leave blank to clear all)
        #[arg(value_name = "ITEM")]
        items: Vec<String>,

        /// Interpret the arguments as tag names instead of item paths
        #[arg(long)]
        tags: bool,

        /// Restrict the operation to the named drivers (repeatable)
        #[arg(long = "driver", value_name = "NAME")]
        drivers: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Delete one or more templates
    Delete {
        /// Template name(s) (ex. site/index)
        #[arg(value_name = "GROUP/NAME", required = true)]
        templates: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ClientResult<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = AdminConfig::load(cli.config.as_deref().map(Path::new))?;

    match cli.command {
        Commands::Cache(cache_cmd) => handle_cache_command(cache_cmd, &config).await,
        Commands::Template(template_cmd) => handle_template_command(template_cmd, &config).await,
    }
}
