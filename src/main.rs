//! # Sahw Helper CLI (`sahw`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sahw search <text>` | Find the correction for a described mistake |
//! | `sahw rules` | Print the rules of Sujood As-Sahw |
//! | `sahw entries` | Print every known mistake and its correction |
//! | `sahw serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! sahw search I forgot my sujud
//! sahw search "rukū‘ missed" --explain
//! sahw --config ./config/sahw.toml serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sahw_helper::{config, corpus, logging, rules, search, server};

/// Sahw Helper: look up the correction for a mistake made in prayer.
#[derive(Parser)]
#[command(
    name = "sahw",
    about = "Sahw Helper: look up the correction for a mistake made in prayer",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/sahw.toml`. Built-in defaults apply when the
    /// file does not exist.
    #[arg(long, global = true, default_value = "./config/sahw.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the correction for a described mistake.
    ///
    /// All remaining words are joined into one description.
    Search {
        /// Free-text description of the mistake.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Also print how the result was reached.
        #[arg(long)]
        explain: bool,
    },

    /// Print the rules of Sujood As-Sahw.
    Rules,

    /// Print every known mistake and its correction.
    Entries,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    let _guards = logging::init(&cfg.logging)?;

    tracing::info!("program started");
    let result = run(cli.command, &cfg).await;
    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "command failed");
    }
    tracing::info!("program ended");

    result
}

async fn run(command: Commands, cfg: &config::Config) -> anyhow::Result<()> {
    match command {
        Commands::Search { text, explain } => {
            let matcher = corpus::build_matcher(cfg)?;
            search::run_search(&matcher, &text.join(" "), explain)?;
        }
        Commands::Rules => {
            rules::run_rules(cfg)?;
        }
        Commands::Entries => {
            let matcher = corpus::build_matcher(cfg)?;
            search::run_entries(&matcher)?;
        }
        Commands::Serve => {
            server::run_server(cfg).await?;
        }
    }

    Ok(())
}
