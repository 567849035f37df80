//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Browse the NASA image library from the terminal.
#[derive(Parser, Debug)]
#[command(name = "nasa-photos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Search query, overrides the configured one.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of result pages to load.
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// Resolve the preview image of every photo.
    #[arg(short, long)]
    pub details: bool,

    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(query) = &self.query {
            config.service.query = query.clone();
        }
        if let Some(pages) = self.pages {
            config.browse.pages = pages;
        }
    }
}
