//! main.rs: H2H quarter standings entry point
//!
//! One run, start to finish:
//!   1. Load config.toml (or defaults) and validate the quarter partition
//!   2. Log in and pull the league roster plus every match result
//!   3. Batch the matches into rounds and aggregate each quarter
//!   4. Write q1.json..q4.json, only after every quarter has succeeded

mod api;
mod auth;
mod config;
mod error;
mod league_client;
mod persistence;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use h2h_core::StandingsError;
use tracing::info;

use auth::FplSession;
use config::{Credentials, FileConfig};
use league_client::LeagueClient;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "h2h-standings", about = "Quarter standings for a fantasy head-to-head league")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Output directory (overrides [output].dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Head-to-head league id
    #[arg(long, env = "FPL_LEAGUE_ID")]
    league_id: u64,
    /// Account login
    #[arg(long, env = "FPL_USERNAME")]
    username: String,
    /// Account password
    #[arg(long, env = "FPL_PASSWORD", hide_env_values = true)]
    password: String,
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "h2h_standings=info,h2h_core=info".into()),
        )
        .init();

    let args = Args::parse();
    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let cfg = FileConfig::load(&args.config)?;
    let plan = cfg.season.plan().context("invalid [season] config")?;
    let out_dir = args.out_dir.unwrap_or_else(|| cfg.output.dir.clone());

    info!(
        "🏆 H2H standings for league {}: {} rounds in {} quarters",
        args.league_id,
        plan.rounds(),
        plan.quarters().len()
    );

    let credentials = Credentials { username: args.username, password: args.password };
    let session = FplSession::new(&cfg.api)?;
    session.login(&cfg.api, &credentials).await.context("login failed")?;

    let league = LeagueClient::new(session, &cfg.api.api_base, args.league_id);
    let entries = league.fetch_entries().await.context("failed to fetch league entries")?;
    let fixtures = league.fetch_fixtures().await.context("failed to fetch league matches")?;

    let rounds = plan
        .batch_rounds(&fixtures, entries.len())
        .with_context(|| format!("cannot split matches into {} rounds", plan.rounds()))?;
    let quarters = plan.standings(&entries, &rounds).map_err(standings_failure)?;

    let written = persistence::save_season(&out_dir, &cfg.output.file_prefix, &quarters).await?;
    info!("✅ Wrote {} quarter files to {}", written.len(), out_dir.display());
    Ok(())
}

fn standings_failure(e: StandingsError) -> anyhow::Error {
    let what = if e.is_data_integrity() {
        "league entries and matches disagree"
    } else {
        "quarter does not fit the season"
    };
    anyhow::Error::new(e).context(format!("{what}; no quarter files written"))
}
