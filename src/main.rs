use std::sync::Arc;

use anyhow::Context;
use augur::services::load_market_file;
use augur::{Config, MarketAnalyzer};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    config.validate().context("invalid configuration")?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.data_path.clone());
    let file = load_market_file(&path)
        .with_context(|| format!("failed to read market data from {}", path))?;
    info!("Loaded {} markets from {}", file.markets.len(), path);

    let analyzer = Arc::new(MarketAnalyzer::new(&config)?);

    // One blocking task per symbol; results are printed in input order.
    let mut tasks = JoinSet::new();
    for (position, market) in file.markets.into_iter().enumerate() {
        let analyzer = Arc::clone(&analyzer);
        tasks.spawn_blocking(move || (position, market.symbol.clone(), analyzer.analyze(&market)));
    }

    let mut analyses = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (position, symbol, result) = joined.context("analysis task panicked")?;
        match result {
            Ok(analysis) => analyses.push((position, analysis)),
            Err(e) => error!("Skipping {}: {}", symbol, e),
        }
    }
    analyses.sort_by_key(|(position, _)| *position);

    for (_, analysis) in &analyses {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    }

    info!("Analyzed {} markets", analyses.len());
    Ok(())
}
