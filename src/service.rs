// Copyright (c) 2025 - Cowboy AI, Inc.
//! Report service
//!
//! Request-side wrapper around a [`ReportAggregator`]. The engine has no
//! deadline of its own; the service bounds each invocation, tags it with a
//! report id, and logs the outcome.
//!
//! ```text
//! Caller ──> ReportService ──timeout──> ReportAggregator ──> Report
//! ```

use std::time::{Duration, Instant};

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::aggregator::{AverageOrdering, ReportAggregator};
use crate::domain::Report;
use crate::errors::{CatalogError, CatalogResult};

/// Default deadline for one report
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Serves reports from one aggregation strategy
pub struct ReportService {
    aggregator: Box<dyn ReportAggregator>,
    timeout: Duration,
}

impl ReportService {
    /// Create a service with the default timeout
    pub fn new(aggregator: Box<dyn ReportAggregator>) -> Self {
        Self {
            aggregator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-report deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-report deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Order of `average_likes_per_game` in reports from this service
    pub fn ordering(&self) -> AverageOrdering {
        self.aggregator.ordering()
    }

    /// Produce one report
    pub async fn report(&self) -> CatalogResult<Report> {
        let report_id = Uuid::now_v7();
        let span = info_span!(
            "report",
            %report_id,
            strategy = self.aggregator.name()
        );

        async {
            let started = Instant::now();
            let result = tokio::time::timeout(self.timeout, self.aggregator.generate_report()).await;

            match result {
                Ok(Ok(report)) => {
                    info!(
                        games = report.average_likes_per_game.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Report generated"
                    );
                    Ok(report)
                }
                Ok(Err(e)) => {
                    warn!("Report failed: {}", e);
                    Err(e)
                }
                Err(_) => {
                    warn!("Report timed out after {:?}", self.timeout);
                    Err(CatalogError::Timeout(format!(
                        "report {} exceeded {:?}",
                        report_id, self.timeout
                    )))
                }
            }
        }
        .instrument(span)
        .await
    }
}
