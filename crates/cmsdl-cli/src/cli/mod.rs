//! CLI for the cmsdl course downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmsdl_core::config;
use std::path::PathBuf;

use commands::{run_download, run_get, run_relay, run_scan, Selection};

/// Top-level CLI for cmsdl.
#[derive(Debug, Parser)]
#[command(name = "cmsdl")]
#[command(about = "cmsdl: bulk downloads from course management pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the weeks and items found on a course page.
    Scan {
        /// Saved HTML file or http(s) URL of the course page.
        page: String,
        /// Print the scrape as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Download the files of a course page (videos are never part of a batch).
    Download {
        /// Saved HTML file or http(s) URL of the course page.
        page: String,
        /// Only this week (e.g. "Week_2024-09-14").
        #[arg(long)]
        week: Option<String>,
        /// Only items of this kind: tutorial, lecture or project.
        #[arg(long)]
        kind: Option<String>,
        /// Print what would be downloaded and exit.
        #[arg(long)]
        dry_run: bool,
        /// Directory to save into (default: config, then current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },

    /// Download a single URL under the given filename.
    Get {
        url: String,
        filename: String,
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },

    /// Run as a browser native messaging host on stdin/stdout.
    Relay {
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Arguments appended by the browser (origin, manifest path); ignored.
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        browser_args: Vec<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan { page, json } => run_scan(&cfg, &page, json).await?,
            CliCommand::Download {
                page,
                week,
                kind,
                dry_run,
                download_dir,
            } => {
                let selection = Selection { week, kind };
                let dir = commands::download_dir(&cfg, download_dir)?;
                run_download(&cfg, &page, &selection, dry_run, &dir).await?;
            }
            CliCommand::Get {
                url,
                filename,
                download_dir,
            } => {
                let dir = commands::download_dir(&cfg, download_dir)?;
                run_get(&cfg, url, filename, &dir).await?;
            }
            CliCommand::Relay {
                download_dir,
                browser_args,
            } => {
                tracing::debug!(?browser_args, "native host started");
                let dir = commands::download_dir(&cfg, download_dir)?;
                run_relay(&cfg, &dir).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
