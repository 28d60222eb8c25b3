// Copyright (c) 2025 - Cowboy AI, Inc.

//! Game catalog report engine
//!
//! Computes a [`Report`] over a catalog of games and their user comments:
//! the most active commenter, the game with the most comment likes, and the
//! rounded-up average likes per game.
//!
//! Two interchangeable strategies produce the report:
//!
//! - [`StreamingAggregator`] folds a lazily fetched corpus in-process
//! - [`PushdownAggregator`] hands declarative pipelines to the store
//!
//! [`ReportService`] wraps either one with a deadline and request logging.

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pipeline;
pub mod projection;
pub mod service;
pub mod store;

#[cfg(feature = "neo4j")]
pub mod adapters;

// Re-export commonly used types
pub use aggregator::{AverageOrdering, PushdownAggregator, ReportAggregator, StreamingAggregator};
pub use config::{Backend, CatalogConfig, Neo4jConfig, Strategy};
pub use domain::{Comment, CommentDate, Game, GameAverageLikes, Report};
pub use errors::{CatalogError, CatalogResult};
pub use service::ReportService;
pub use store::{AggregationStore, GameCorpusSource, InMemoryCatalog};
