// Copyright (c) 2025 - Cowboy AI, Inc.
//! Streaming strategy: fold the corpus in-process

use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::domain::Report;
use crate::errors::{CatalogError, CatalogResult};
use crate::projection::ReportAccumulator;
use crate::store::GameCorpusSource;

use super::{AverageOrdering, ReportAggregator};

/// Aggregator that consumes a [`GameCorpusSource`] lazily, one game at a time
pub struct StreamingAggregator<S> {
    source: S,
}

impl<S: GameCorpusSource> StreamingAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: GameCorpusSource> ReportAggregator for StreamingAggregator<S> {
    async fn generate_report(&self) -> CatalogResult<Report> {
        let mut games = self.source.fetch_all_games().await?;
        let mut acc = ReportAccumulator::new();

        while let Some(next) = games.next().await {
            match next {
                Ok(game) => acc.process_game(&game),
                Err(e) => {
                    warn!(
                        "Source '{}' failed after {} games: {}",
                        self.source.name(),
                        acc.games_processed(),
                        e
                    );
                    return Err(CatalogError::IncompleteCorpus {
                        games_processed: acc.games_processed(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Streamed {} games from '{}'",
            acc.games_processed(),
            self.source.name()
        );
        Ok(acc.finish())
    }

    fn ordering(&self) -> AverageOrdering {
        AverageOrdering::InputOrder
    }

    fn name(&self) -> &str {
        "streaming"
    }
}
