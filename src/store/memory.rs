// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory catalog
//!
//! Holds the corpus behind an async `RwLock`. Both ports work on a snapshot
//! taken under the read lock, so writers never change a corpus mid-scan.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::Game;
use crate::errors::{CatalogError, CatalogResult};
use crate::pipeline::{eval, Pipeline, Row};

use super::{AggregationStore, GameCorpusSource, GameStream};

/// Catalog kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    games: Arc<RwLock<Vec<Game>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given games, in order
    pub fn with_games(games: Vec<Game>) -> Self {
        Self {
            games: Arc::new(RwLock::new(games)),
        }
    }

    /// Load a catalog from a JSON array of games
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let games: Vec<Game> = serde_json::from_str(json)
            .map_err(|e| CatalogError::Deserialization(e.to_string()))?;
        Ok(Self::with_games(games))
    }

    /// Append a game at the end of the corpus
    pub async fn insert(&self, game: Game) {
        self.games.write().await.push(game);
    }

    /// Number of games held
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// Whether the catalog holds no games
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    /// Copy of the current corpus
    pub async fn snapshot(&self) -> Vec<Game> {
        self.games.read().await.clone()
    }
}

#[async_trait]
impl GameCorpusSource for InMemoryCatalog {
    async fn fetch_all_games(&self) -> CatalogResult<GameStream<'_>> {
        let games = self.snapshot().await;
        debug!("Streaming {} games from memory", games.len());
        Ok(stream::iter(games.into_iter().map(Ok)).boxed())
    }

    fn name(&self) -> &str {
        "in-memory-catalog"
    }
}

#[async_trait]
impl AggregationStore for InMemoryCatalog {
    async fn aggregate_all(&self, pipelines: &[Pipeline]) -> CatalogResult<Vec<Vec<Row>>> {
        // one guard for every pipeline so they all see the same corpus
        let games = self.games.read().await;
        let results = pipelines
            .iter()
            .map(|pipeline| eval::evaluate(pipeline, &games))
            .collect::<CatalogResult<Vec<_>>>()?;
        debug!(
            "Evaluated {} pipelines over {} games",
            pipelines.len(),
            games.len()
        );
        Ok(results)
    }

    fn name(&self) -> &str {
        "in-memory-catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn test_stream_is_a_snapshot() {
        let catalog = InMemoryCatalog::with_games(vec![Game::new("Dummy")]);

        let stream = catalog.fetch_all_games().await.unwrap();
        catalog.insert(Game::new("Late Arrival")).await;
        let games: Vec<Game> = stream.try_collect().await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(catalog.len().await, 2);
    }

    #[tokio::test]
    async fn test_aggregate_all_returns_one_result_set_per_pipeline() {
        let catalog = InMemoryCatalog::with_games(vec![Game::new("Dummy"), Game::new("Quiet")]);

        let results = catalog
            .aggregate_all(&[Pipeline::comments_per_user(), Pipeline::likes_per_game()])
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_empty());
        assert_eq!(results[1].len(), 2);

        let single = catalog.aggregate(&Pipeline::likes_per_game()).await.unwrap();
        assert_eq!(single, results[1]);
    }

    #[test]
    fn test_from_json() {
        let catalog = InMemoryCatalog::from_json(
            r#"[{"title": "Dummy", "comments": [
                {"user": "Jacqueline Dodson", "message": "hi", "dateCreated": "2004-03-19", "like": 5}
            ]}]"#,
        )
        .unwrap();

        let games = tokio_test::block_on(catalog.snapshot());
        assert_eq!(games[0].comments[0].like, 5);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = InMemoryCatalog::from_json(r#"{"title": "not an array"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Deserialization(_)));
    }
}
