//! kwatch-config — load and check a kwatch settings file.
//!
//! Reads the file named by `--config` (or `CONFIG_FILE`), runs the same
//! load and validation the agent runs at startup, and prints a redacted
//! summary. Exits non-zero on any read, parse or validation error, so it
//! can gate deployments in CI.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use kwatch_config::{SettingsLoader, CONFIG_FILE_ENV};

// ── CLI ─────────────────────────────────────────────────────────────

/// Validate a kwatch config file and print the resolved settings.
#[derive(Parser, Debug)]
#[command(name = "kwatch-config", version, about)]
struct Cli {
    /// Path to the YAML settings file.
    #[arg(long, env = CONFIG_FILE_ENV)]
    config: PathBuf,

    /// Print the summary as JSON instead of log lines.
    #[arg(long)]
    json: bool,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // .env may provide CONFIG_FILE, so load it before parsing arguments.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = SettingsLoader::new(&cli.config)
        .load()
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    if cli.json {
        let summary = serde_json::to_string_pretty(&settings.redacted_summary())?;
        println!("{summary}");
    } else {
        settings.log_summary();
    }

    info!(warnings = settings.warnings().len(), "config is valid");
    Ok(())
}
