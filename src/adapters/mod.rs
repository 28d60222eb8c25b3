// Copyright (c) 2025 - Cowboy AI, Inc.

//! Database-backed catalog implementations
//!
//! Each adapter implements [`crate::store::GameCorpusSource`] and
//! [`crate::store::AggregationStore`] for one external database.

#[cfg(feature = "neo4j")]
pub mod neo4j;

#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jCatalog;
