use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "finnrick",
    version,
    about = "Resolve and render Finnrick rating widgets"
)]
pub struct Args {
    /// TOML file with widget settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL (overrides the config file)
    #[arg(long, global = true, env = "FINNRICK_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Catalog fetch timeout in milliseconds (overrides the config file)
    #[arg(long, global = true, env = "FINNRICK_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Log verbosity: -v for debug, -vv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the rating for one product identifier
    Rating {
        /// Host-facing product identifier, e.g. `product-1`
        product_id: String,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Run the widget over a page description and print the resulting page
    Page {
        /// JSON page description
        path: PathBuf,
    },

    /// List known product identifiers and their catalog ids
    Products,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Html,
}
