// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for catalog and report operations

use thiserror::Error;

/// Errors that can occur while fetching or aggregating catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The corpus could not be fetched from the data source
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// The source failed after part of the corpus was consumed
    #[error("Corpus fetch failed after {games_processed} games: {reason}")]
    IncompleteCorpus {
        /// Games folded into the accumulator before the failure
        games_processed: usize,
        /// Underlying failure
        reason: String,
    },

    /// A pipeline could not be built, compiled or executed
    #[error("Query error: {0}")]
    Query(String),

    /// A result row did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Whether the error originated in the data source rather than the engine
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            CatalogError::DataAccess(_) | CatalogError::IncompleteCorpus { .. }
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

#[cfg(feature = "neo4j")]
impl From<neo4rs::Error> for CatalogError {
    fn from(err: neo4rs::Error) -> Self {
        CatalogError::DataAccess(err.to_string())
    }
}
