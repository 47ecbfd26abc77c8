//! Fetch the challenge-filter list and print it.
//!
//! Configuration comes from `SC_API_*` environment variables (or `.env`),
//! overridden by command-line flags.

use std::time::Duration;

use anyhow::{Context, Result};
use challenge_core::{ApiService, ChallengeCatalog, ClientConfig, DesignType, TopCategory};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fetch SurvivalChallenge filters
#[derive(Parser)]
#[command(name = "fetch-challenges")]
#[command(about = "Fetch and list SurvivalChallenge filters")]
#[command(version)]
struct Cli {
    /// API root, e.g. http://127.0.0.1:3000
    #[arg(long)]
    base_url: Option<String>,

    /// Signing token sent as the `sign` query parameter
    #[arg(long)]
    sign: Option<String>,

    /// Per-call timeout in seconds (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Only list challenges under this home tab (hot, ranking, guess, coloring)
    #[arg(short, long)]
    category: Option<TopCategory>,

    /// Print the challenges as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(sign) = cli.sign {
        config.sign = sign;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    info!(base_url = %config.base_url, "fetching challenges");
    let service = ApiService::new(config);
    let mut catalog = ChallengeCatalog::new();
    if let Err(e) = catalog.refresh(&service) {
        anyhow::bail!("{} (code {}): {e}", e.description(), e.code());
    }

    let challenges = match cli.category {
        Some(category) => {
            catalog.select(category);
            catalog.filtered()
        }
        None => catalog.all().iter().collect(),
    };

    if cli.json {
        let out = serde_json::to_string_pretty(&challenges).context("Failed to serialize challenges")?;
        println!("{out}");
        return Ok(());
    }

    for challenge in challenges {
        let design = DesignType::for_challenge(&challenge.category, &challenge.name)
            .map(|d| format!("{d:?}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<10} {:<24} {:<10} {}",
            challenge.id,
            challenge.category,
            challenge.name,
            design,
            challenge.thump_url.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
