//! CLI for urlgate.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlgate_core::admission::AdmissionController;
use urlgate_core::config;
use urlgate_core::fetch::CurlFetcher;
use urlgate_core::registry::SqliteRegistry;
use urlgate_core::screen::ContentScreener;

use commands::{run_check, run_get, run_list, run_remove, run_screen, CheckInput};

/// Controller wired with the production registry and fetcher.
pub type Gate = AdmissionController<SqliteRegistry, CurlFetcher>;

/// Top-level CLI for urlgate.
#[derive(Debug, Parser)]
#[command(name = "urlgate")]
#[command(about = "urlgate: screen pages for forbidden words and keep a registry of authorized URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Screen a page and admit its URL to the registry if no forbidden word is found.
    Check {
        /// HTTP/HTTPS URL of the page.
        #[arg(required_unless_present = "request", conflicts_with = "request")]
        url: Option<String>,

        /// Forbidden word (repeatable).
        #[arg(short = 'w', long = "word", value_name = "WORD", conflicts_with = "request")]
        words: Vec<String>,

        /// Read `{"url": ..., "words": [...]}` from a JSON file instead.
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Screen a page without touching the registry.
    Screen {
        /// HTTP/HTTPS URL of the page.
        url: String,

        /// Forbidden word (repeatable).
        #[arg(short = 'w', long = "word", value_name = "WORD")]
        words: Vec<String>,
    },

    /// Show the registry entry for a URL.
    Get {
        url: String,
    },

    /// List all registry entries, newest first.
    List {
        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Remove a URL from the registry.
    Remove {
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let registry = SqliteRegistry::open(&cfg).await?;
        let screener = ContentScreener::new(CurlFetcher::new(cfg.fetch.clone()));
        let gate = Gate::new(registry.clone(), screener);

        let outcome = match cli.command {
            CliCommand::Check {
                url,
                words,
                request,
                json,
            } => {
                let input = match request {
                    Some(path) => CheckInput::File(path),
                    None => CheckInput::Args {
                        url: url.unwrap_or_default(),
                        words,
                    },
                };
                run_check(&gate, input, json).await
            }
            CliCommand::Screen { url, words } => run_screen(&gate, &url, &words).await,
            CliCommand::Get { url } => run_get(&gate, &url).await,
            CliCommand::List { json } => run_list(&gate, json).await,
            CliCommand::Remove { url } => run_remove(&gate, &url).await,
        };

        registry.close().await;
        outcome
    }
}

#[cfg(test)]
mod tests;
