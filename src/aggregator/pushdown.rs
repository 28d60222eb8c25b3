// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pushdown strategy: let the store aggregate

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{GameAverageLikes, Report};
use crate::errors::{CatalogError, CatalogResult};
use crate::pipeline::{decode_rows, GameLikeTotals, Pipeline, Row, UserCommentCount};
use crate::store::AggregationStore;

use super::{AverageOrdering, ReportAggregator};

/// Aggregator that sends declarative pipelines to an [`AggregationStore`]
pub struct PushdownAggregator<Q> {
    store: Q,
}

impl<Q: AggregationStore> PushdownAggregator<Q> {
    pub fn new(store: Q) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &Q {
        &self.store
    }
}

fn most_commented_user(rows: Vec<Row>) -> CatalogResult<String> {
    let users: Vec<UserCommentCount> = decode_rows(rows)?;
    Ok(users.into_iter().next().map(|u| u.user).unwrap_or_default())
}

/// Assemble a report from the two pipeline results
///
/// `games` must already be ordered by total likes, highest first.
pub fn assemble_report(user_with_most_comments: String, games: Vec<GameLikeTotals>) -> Report {
    let highest_rated_game = games.first().map(|g| g.title.clone()).unwrap_or_default();
    let average_likes_per_game = games
        .into_iter()
        .map(|g| GameAverageLikes {
            title: g.title,
            average_likes: g.average_likes,
        })
        .collect();

    Report {
        user_with_most_comments,
        highest_rated_game,
        average_likes_per_game,
    }
}

#[async_trait]
impl<Q: AggregationStore> ReportAggregator for PushdownAggregator<Q> {
    async fn generate_report(&self) -> CatalogResult<Report> {
        let pipelines = [Pipeline::comments_per_user(), Pipeline::likes_per_game()];
        let mut results = self.store.aggregate_all(&pipelines).await?.into_iter();

        let (Some(user_rows), Some(game_rows)) = (results.next(), results.next()) else {
            return Err(CatalogError::Query(format!(
                "store '{}' returned fewer result sets than pipelines",
                self.store.name()
            )));
        };

        let user = most_commented_user(user_rows)?;
        let games: Vec<GameLikeTotals> = decode_rows(game_rows)?;

        debug!(
            "Store '{}' aggregated {} games",
            self.store.name(),
            games.len()
        );
        Ok(assemble_report(user, games))
    }

    fn ordering(&self) -> AverageOrdering {
        AverageOrdering::TotalLikesDescending
    }

    fn name(&self) -> &str {
        "pushdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, CommentDate, Game};
    use crate::projection::generate_report;
    use crate::store::InMemoryCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that appends a game after every call, like a concurrent writer
    struct ChurningStore {
        inner: InMemoryCatalog,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AggregationStore for ChurningStore {
        async fn aggregate_all(&self, pipelines: &[Pipeline]) -> CatalogResult<Vec<Vec<Row>>> {
            let results = self.inner.aggregate_all(pipelines).await?;
            let date = CommentDate::default();
            let late = (0..5).fold(Game::new("Late Arrival"), |game, _| {
                game.with_comment(Comment::new("Zed", 100, date))
            });
            self.inner.insert(late).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(results)
        }

        fn name(&self) -> &str {
            "churning"
        }
    }

    #[tokio::test]
    async fn test_report_reads_one_corpus_version() {
        let date = CommentDate::default();
        let games = vec![Game::new("Dummy")
            .with_comment(Comment::new("Jacqueline Dodson", 5, date))
            .with_comment(Comment::new("Jacqueline Dodson", 1, date))];
        let expected = generate_report(&games);

        let aggregator = PushdownAggregator::new(ChurningStore {
            inner: InMemoryCatalog::with_games(games),
            calls: AtomicUsize::new(0),
        });
        let report = aggregator.generate_report().await.unwrap();

        assert_eq!(aggregator.store().calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.user_with_most_comments, expected.user_with_most_comments);
        assert_eq!(report.highest_rated_game, expected.highest_rated_game);
        assert_eq!(report.average_likes_per_game, expected.average_likes_per_game);
    }

    #[test]
    fn test_assemble_empty() {
        assert_eq!(assemble_report(String::new(), Vec::new()), Report::default());
    }

    #[test]
    fn test_assemble_takes_first_game_as_highest_rated() {
        let games = vec![
            GameLikeTotals {
                position: 1,
                title: "Solitary Voyage".to_string(),
                comment_count: 1,
                total_likes: 9,
                average_likes: 9,
            },
            GameLikeTotals {
                position: 0,
                title: "Dummy".to_string(),
                comment_count: 2,
                total_likes: 6,
                average_likes: 3,
            },
        ];

        let report = assemble_report("Jacqueline Dodson".to_string(), games);
        assert_eq!(report.highest_rated_game, "Solitary Voyage");
        assert_eq!(report.average_likes_per_game.len(), 2);
        assert_eq!(report.average_likes_per_game[1].average_likes, 3);
    }
}
