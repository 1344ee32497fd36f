pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hn-digest")]
#[command(about = "Summarize the articles linked from a news listing page", long_about = None)]
pub struct Cli {
    /// Settings file (default: ~/.config/hn-digest/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize every link on the listing page
    Run(RunArgs),
    /// Print the text extracted from one article
    Extract {
        /// Article URL
        url: String,
    },
    /// Summarize a single article
    Summarize {
        /// Article URL
        url: String,
    },
    /// Write default settings and a bundle template
    Init,
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Listing page URL (default: from settings)
    #[arg(long)]
    pub page: Option<String>,

    /// Read the listing page from a saved HTML file instead of fetching it
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the page with summaries inserted instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Links per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds
    #[arg(long)]
    pub cooldown_ms: Option<u64>,
}
