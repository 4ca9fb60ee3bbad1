//! Weave CLI - thin demo client for the orchestration engine.
//!
//! This binary wires a loaded [`weave_config::EngineConfig`], the Skill and
//! SubAgent catalogs, and a [`weave_llm::LlmProvider`] through
//! [`weave_runtime::ExecutionRouter`], then prints the streamed
//! [`weave_events::EngineEvent`]s as they arrive. It exists to exercise the
//! engine end-to-end; a real deployment plugs in its own `LlmProvider` in
//! place of [`echo_provider::EchoProvider`].

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config_bridge;
mod echo_provider;
mod theme;

use commands::{doctor, run};

/// Weave - a two-tier tool-use orchestration engine.
#[derive(Parser)]
#[command(name = "weave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging, overriding configuration.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace root to load config/Skill/SubAgent directories from.
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single turn through the router and stream its events.
    Run {
        /// The user utterance to execute.
        prompt: String,

        /// Force the deep `L3ReActEngine` route instead of the bounded
        /// fast-track loop.
        #[arg(long)]
        deep: bool,
    },

    /// Check that configuration and catalogs load cleanly.
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = weave_config::load(cli.workspace.as_deref()).unwrap_or_default();
    let mut log_config = config_bridge::to_log_config(&config);
    if cli.verbose {
        log_config = log_config.with_directive("weave_runtime=debug");
    }
    if let Err(e) = weave_telemetry::setup_logging(&log_config) {
        eprintln!("failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Run { prompt, deep } => run::run_once(&prompt, deep, cli.workspace, config).await,
        Commands::Doctor => doctor::run_doctor(cli.workspace.as_deref()),
    }
}
