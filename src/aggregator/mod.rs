// Copyright (c) 2025 - Cowboy AI, Inc.

//! Report aggregators
//!
//! One capability, two execution strategies:
//!
//! ```text
//!                       ┌──────────────────────┐
//! GameCorpusSource ───> │ StreamingAggregator  │ ──┐
//!                       └──────────────────────┘   │
//!                                                  ├──> Report
//!                       ┌──────────────────────┐   │
//! AggregationStore ───> │ PushdownAggregator   │ ──┘
//!                       └──────────────────────┘
//! ```
//!
//! Both strategies share the same grouping and tie-break rules and agree on
//! `user_with_most_comments`, `highest_rated_game` and the set of average
//! entries. They differ only in the order of `average_likes_per_game`,
//! which each aggregator reports through [`ReportAggregator::ordering`].
//!
//! # Example
//!
//! ```rust
//! use game_catalog::aggregator::{PushdownAggregator, ReportAggregator, StreamingAggregator};
//! use game_catalog::domain::Game;
//! use game_catalog::store::InMemoryCatalog;
//!
//! # tokio_test::block_on(async {
//! let catalog = InMemoryCatalog::with_games(vec![Game::new("Dummy")]);
//!
//! let streamed = StreamingAggregator::new(catalog.clone()).generate_report().await?;
//! let pushed = PushdownAggregator::new(catalog).generate_report().await?;
//!
//! assert_eq!(streamed.highest_rated_game, pushed.highest_rated_game);
//! # Ok::<(), game_catalog::CatalogError>(())
//! # }).unwrap();
//! ```

pub mod pushdown;
pub mod streaming;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Report;
use crate::errors::CatalogResult;

pub use pushdown::PushdownAggregator;
pub use streaming::StreamingAggregator;

/// Order of `average_likes_per_game` in the produced report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageOrdering {
    /// Same order as the corpus
    InputOrder,
    /// Highest total likes first, ties in corpus order
    TotalLikesDescending,
}

/// Produces a [`Report`] over the whole catalog
///
/// Every call builds its own accumulator, so one aggregator can serve
/// concurrent callers.
#[async_trait]
pub trait ReportAggregator: Send + Sync {
    /// Compute the report
    ///
    /// Data-access failures are returned as errors; a report is only
    /// returned when the whole corpus was aggregated.
    async fn generate_report(&self) -> CatalogResult<Report>;

    /// Order of the average-likes entries this strategy emits
    fn ordering(&self) -> AverageOrdering;

    /// Name of this aggregator, for logging
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ReportAggregator + ?Sized> ReportAggregator for Box<T> {
    async fn generate_report(&self) -> CatalogResult<Report> {
        (**self).generate_report().await
    }

    fn ordering(&self) -> AverageOrdering {
        (**self).ordering()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
