//! `medlist` command-line entry point.
//!
//! A thin shell over the library: it resolves configuration, initializes
//! logging, builds a [`ListController`](medlist::ListController) and drives it
//! for one command.
//!
//! # Commands
//!
//! - `list [--search TERM] [--json]`: Load the catalog and print it
//! - `update ID [--name ..] [--price ..] [--rating ..] [--description ..] [--image ..]`
//! - `remove ID`
//!
//! # Configuration Precedence
//!
//! 1. Command-line flags (`--source`, `--url`)
//! 2. `--config PATH`, or the default config file if present
//! 3. Built-in defaults
//!
//! Runs on a current-thread runtime: the controller is a single cooperative task.

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use medlist::ui::{compute_viewmodel_with, render};
use medlist::{initialize, CatalogError, Config, MatchMode, MedicinePatch, SourceKind};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "medlist")]
#[command(about = "Browse and edit a medicine catalog")]
#[command(version)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data source: static or remote
    #[arg(long, global = true)]
    source: Option<SourceKind>,

    /// Remote API base URL (implies --source remote)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and print it
    #[command(visible_alias = "ls")]
    List {
        /// Only show medicines whose name or description matches
        #[arg(short, long)]
        search: Option<String>,

        /// Match mode: substring or fuzzy
        #[arg(short, long)]
        mode: Option<MatchMode>,

        /// Print the matching items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change fields of one medicine
    Update {
        /// Medicine ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        rating: Option<f64>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete one medicine
    #[command(visible_alias = "rm")]
    Remove {
        /// Medicine ID
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    medlist::observability::init_tracing(&config);

    match run(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "command failed");
            eprintln!("{}: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> medlist::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover()?,
    };
    apply_overrides(cli, &mut config);
    config.validate()?;
    Ok(config)
}

/// Applies command-line flags on top of file configuration.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(url) = &cli.url {
        config.api_url.clone_from(url);
        config.source = SourceKind::Remote;
    }
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Commands::List { mode: Some(mode), .. } = &cli.command {
        config.match_mode = *mode;
    }
}

async fn run(command: Commands, config: Config) -> medlist::Result<ExitCode> {
    let controller = initialize(&config)?;

    match command {
        Commands::List { search, json, .. } => {
            controller.load().await;
            if let Some(term) = search {
                controller.set_search(term);
            }
            let snapshot = controller.snapshot();

            let mut out = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &*snapshot.items)
                    .map_err(|e| CatalogError::Parse(e.to_string()))?;
                writeln!(out)?;
            } else {
                let vm = compute_viewmodel_with(&snapshot, config.match_mode, chrono::Utc::now());
                render(&vm, &mut out)?;
            }

            if let Some(detail) = &snapshot.error_detail {
                eprintln!("{detail}");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Update {
            id,
            name,
            price,
            rating,
            description,
            image,
        } => {
            let patch = MedicinePatch {
                name,
                price,
                rating,
                description,
                image,
            };
            if patch.is_empty() {
                return Err(CatalogError::Validation(
                    "nothing to update: pass at least one field".to_string(),
                ));
            }

            controller.update_item(&id, &patch).await?;
            println!("Updated medicine {id}");
            Ok(ExitCode::SUCCESS)
        }

        Commands::Remove { id } => {
            controller.remove_item(&id).await?;
            println!("Removed medicine {id}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
