//! CLI for the pdfdl batch fetcher.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfdl_core::config::{self, FetchConfig};
use pdfdl_core::logging;
use std::path::PathBuf;

use commands::{run_extract, run_fetch, run_list_tasks};

/// Top-level CLI. With no subcommand, runs the full download.
#[derive(Debug, Parser)]
#[command(name = "pdfdl")]
#[command(about = "Download batches of archive PDFs listed in local manifests", long_about = None)]
pub struct Cli {
    /// TOML file overriding the built-in settings.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory with *.txt / *.json manifests (default: txt).
    #[arg(long, global = true, value_name = "DIR")]
    pub manifest_dir: Option<PathBuf>,

    /// Directory downloaded files are written to (default: pdfs).
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Prefix each manifest path is appended to.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Enumerate manifests and download every task (the default).
    Run,

    /// Print the task list without downloading anything.
    Tasks,

    /// Extract PDF links from a saved search page into a manifest.
    Extract {
        /// Saved HTML page.
        html: PathBuf,

        /// Manifest to write (default: <manifest-dir>/pdf_paths.txt,
        /// or <manifest-dir>/pdf_links.json with --json).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a JSON manifest of `{title, link}` items instead of a path list.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        Cli::parse().dispatch().await
    }

    /// Built-in defaults, then `--config`, then individual flags.
    pub fn resolve_config(&self) -> Result<FetchConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => FetchConfig::default(),
        };
        if let Some(dir) = &self.manifest_dir {
            cfg.manifest_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            cfg.base_url = url.clone();
        }
        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }

    async fn dispatch(self) -> Result<()> {
        let cfg = self.resolve_config()?;

        match self.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => {
                if let Err(e) = logging::init_run_logging(&cfg.log_dir) {
                    logging::init_stderr_only();
                    tracing::warn!("run log unavailable, logging to stderr only: {:#}", e);
                }
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg).await?;
            }
            CliCommand::Tasks => {
                logging::init_stderr_only();
                run_list_tasks(&cfg)?;
            }
            CliCommand::Extract { html, output, json } => {
                logging::init_stderr_only();
                let default_name = if json { "pdf_links.json" } else { "pdf_paths.txt" };
                let dest = output.unwrap_or_else(|| cfg.manifest_dir.join(default_name));
                run_extract(&html, &dest, json)?;
            }
        }

        Ok(())
    }
}
