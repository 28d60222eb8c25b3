// Copyright (c) 2025 - Cowboy AI, Inc.
//! Corpus sources and aggregation stores
//!
//! The report engine reads the catalog through two ports:
//!
//! - [`GameCorpusSource`] streams every game, once, top to bottom
//! - [`AggregationStore`] evaluates a declarative [`Pipeline`] store-side
//!
//! Backends may implement one or both. Failures are reported as
//! [`CatalogError::DataAccess`](crate::errors::CatalogError::DataAccess)
//! items in the stream or as the call's error.

pub mod memory;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::Game;
use crate::errors::{CatalogError, CatalogResult};
use crate::pipeline::{Pipeline, Row};

pub use memory::InMemoryCatalog;

/// Lazily consumed sequence of games
pub type GameStream<'a> = BoxStream<'a, CatalogResult<Game>>;

/// Provider of the full game corpus
#[async_trait]
pub trait GameCorpusSource: Send + Sync {
    /// Fetch every game in the catalog
    ///
    /// The stream yields games in a stable order. An `Err` item means the
    /// fetch failed mid-sequence; consumers stop there.
    async fn fetch_all_games(&self) -> CatalogResult<GameStream<'_>>;

    /// Name of this source, for logging
    fn name(&self) -> &str;
}

/// Store able to run aggregation pipelines itself
#[async_trait]
pub trait AggregationStore: Send + Sync {
    /// Execute several pipelines against one consistent view of the corpus
    ///
    /// Returns one result set per pipeline, in the order given. Writes that
    /// land while the call runs are seen by all pipelines or by none.
    async fn aggregate_all(&self, pipelines: &[Pipeline]) -> CatalogResult<Vec<Vec<Row>>>;

    /// Execute a pipeline and return its result rows in order
    async fn aggregate(&self, pipeline: &Pipeline) -> CatalogResult<Vec<Row>> {
        self.aggregate_all(std::slice::from_ref(pipeline))
            .await?
            .pop()
            .ok_or_else(|| {
                CatalogError::Query(format!("pipeline '{}' returned no result set", pipeline.name))
            })
    }

    /// Name of this store, for logging
    fn name(&self) -> &str;
}
