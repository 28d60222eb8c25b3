// Copyright (c) 2025 - Cowboy AI, Inc.
//! Catalog Report CLI
//!
//! Loads a game catalog, computes one report and prints it as JSON.
//!
//! Run with: cargo run --bin catalog-report
//!
//! Environment:
//! - CATALOG_BACKEND: `memory` (default) or `neo4j` (needs `--features neo4j`)
//! - CATALOG_STRATEGY: `streaming` (default) or `pushdown`
//! - CATALOG_SEED_PATH: JSON array of games loaded before the report runs
//! - CATALOG_FETCH_TIMEOUT_SECS: report deadline in seconds (default 10)
//! - NEO4J_URI, NEO4J_USER, NEO4J_PASSWORD: Neo4j connection
//! - RUST_LOG: log filter

use anyhow::{Context, Result};
use game_catalog::{
    Backend, CatalogConfig, InMemoryCatalog, PushdownAggregator, ReportAggregator,
    ReportService, Strategy, StreamingAggregator,
};
use tracing::info;

fn aggregator_for<C>(strategy: Strategy, catalog: C) -> Box<dyn ReportAggregator>
where
    C: game_catalog::GameCorpusSource + game_catalog::AggregationStore + 'static,
{
    match strategy {
        Strategy::Streaming => Box::new(StreamingAggregator::new(catalog)),
        Strategy::Pushdown => Box::new(PushdownAggregator::new(catalog)),
    }
}

fn read_seed(config: &CatalogConfig) -> Result<Option<String>> {
    match &config.seed_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            Ok(Some(json))
        }
        None => Ok(None),
    }
}

async fn memory_aggregator(config: &CatalogConfig) -> Result<Box<dyn ReportAggregator>> {
    let catalog = match read_seed(config)? {
        Some(json) => InMemoryCatalog::from_json(&json).context("Invalid seed catalog")?,
        None => InMemoryCatalog::new(),
    };
    info!("Loaded {} games into memory", catalog.len().await);
    Ok(aggregator_for(config.strategy, catalog))
}

#[cfg(feature = "neo4j")]
async fn neo4j_aggregator(config: &CatalogConfig) -> Result<Box<dyn ReportAggregator>> {
    use game_catalog::adapters::Neo4jCatalog;
    use game_catalog::Game;

    let catalog = Neo4jCatalog::new(config.neo4j.clone())
        .await
        .context("Failed to connect to Neo4j")?;
    catalog.health_check().await?;
    catalog.initialize().await?;

    if let Some(json) = read_seed(config)? {
        let games: Vec<Game> = serde_json::from_str(&json).context("Invalid seed catalog")?;
        catalog.reset().await?;
        for game in &games {
            catalog.insert_game(game).await?;
        }
        info!("Seeded {} games into Neo4j", games.len());
    }

    Ok(aggregator_for(config.strategy, catalog))
}

#[cfg(not(feature = "neo4j"))]
async fn neo4j_aggregator(_config: &CatalogConfig) -> Result<Box<dyn ReportAggregator>> {
    Err(game_catalog::CatalogError::Configuration(
        "CATALOG_BACKEND=neo4j requires building with --features neo4j".to_string(),
    )
    .into())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CatalogConfig::from_env().context("Invalid configuration")?;
    info!("📋 Configuration loaded:");
    info!("  - Backend: {:?}", config.backend);
    info!("  - Strategy: {:?}", config.strategy);
    info!("  - Timeout: {:?}", config.fetch_timeout);

    let aggregator = match config.backend {
        Backend::Memory => memory_aggregator(&config).await?,
        Backend::Neo4j => neo4j_aggregator(&config).await?,
    };

    let service = ReportService::new(aggregator).with_timeout(config.fetch_timeout);
    let report = service.report().await.context("Report generation failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to encode report")?
    );
    Ok(())
}
