// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recall - conversation context assembly for chat backends.
//!
//! This is the binary entry point for the Recall command line.

mod assemble;
mod backends;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::assemble::AssembleArgs;

/// Recall - conversation context assembly for chat backends.
#[derive(Parser, Debug)]
#[command(name = "recall", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered model backends.
    Backends {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration.
    Config,
    /// Assemble a model request from stored history and a new question.
    Assemble(AssembleArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => recall_config::load_and_validate_path(path),
        None => recall_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            recall_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    tracing::debug!(agent_name = config.agent.name.as_str(), "configuration loaded");

    let result = match cli.command {
        Commands::Backends { json } => backends::run_backends(&config, json),
        Commands::Config => config::run_config(&config),
        Commands::Assemble(args) => assemble::run_assemble(&config, args).await,
    };

    if let Err(e) = result {
        eprintln!("recall: {e}");
        std::process::exit(1);
    }
}

/// Crates whose logs follow `agent.log_level`.
const LOG_TARGETS: &[&str] = &[
    "recall",
    "recall_core",
    "recall_config",
    "recall_context",
    "recall_router",
    "recall_agent",
];

/// Builds the default filter directive for `log_level`.
fn default_filter(log_level: &str) -> String {
    let mut directive = String::from("warn");
    for target in LOG_TARGETS {
        directive.push_str(&format!(",{target}={log_level}"));
    }
    directive
}

/// Initializes the tracing subscriber on stderr. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
