//! Review a PGN file with a local UCI engine and print the report as JSON.

use std::sync::atomic::AtomicBool;

use anyhow::Context;
use engine_client::EngineConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: review-game <game.pgn>")?;
    let pgn = std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;

    let config = EngineConfig::from_env();
    let abort = AtomicBool::new(false);
    let report = game_review::review_pgn(
        &config,
        &pgn,
        |done, total| info!(done, total, "reviewing"),
        &abort,
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
