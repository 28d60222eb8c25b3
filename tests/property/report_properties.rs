// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Report Generation
//!
//! Generates arbitrary catalogs and checks that the report picks true
//! maxima, covers every game and does not depend on the strategy used.

use std::collections::BTreeMap;

use game_catalog::aggregator::{PushdownAggregator, ReportAggregator, StreamingAggregator};
use game_catalog::domain::{average_likes, Comment, CommentDate, Game, Report};
use game_catalog::projection::{fold_projection, generate_report, report_projection, ReportAccumulator};
use game_catalog::store::InMemoryCatalog;
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Small user pool so that ties and repeat commenters are common
fn user() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Courtney Knapp".to_string()),
        Just("Jacqueline Dodson".to_string()),
        Just("Tyler Ramos".to_string()),
        Just("Zoe".to_string()),
    ]
}

fn comment() -> impl Strategy<Value = Comment> {
    (user(), -20i64..20, 0i64..1_500_000_000).prop_map(|(user, like, seconds)| {
        let date = CommentDate::from_epoch_seconds(seconds).unwrap_or_default();
        Comment::new(user, like, date)
    })
}

fn game() -> impl Strategy<Value = Game> {
    (
        prop_oneof![Just("Dummy"), Just("Solitary Voyage"), Just("Echo Chamber")],
        prop::collection::vec(comment(), 0..6),
    )
        .prop_map(|(title, comments)| {
            comments
                .into_iter()
                .fold(Game::new(title), |game, c| game.with_comment(c))
        })
}

fn catalog() -> impl Strategy<Value = Vec<Game>> {
    prop::collection::vec(game(), 0..12)
}

fn comment_counts(games: &[Game]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for comment in games.iter().flat_map(|g| g.comments.iter()) {
        *counts.entry(comment.user.clone()).or_insert(0) += 1;
    }
    counts
}

fn both_reports(games: Vec<Game>) -> (Report, Report) {
    let catalog = InMemoryCatalog::with_games(games);
    tokio_test::block_on(async {
        let streamed = StreamingAggregator::new(catalog.clone())
            .generate_report()
            .await
            .expect("streaming report");
        let pushed = PushdownAggregator::new(catalog)
            .generate_report()
            .await
            .expect("pushdown report");
        (streamed, pushed)
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: One average entry per game, in input order
    #[test]
    fn prop_one_entry_per_game(games in catalog()) {
        let report = generate_report(&games);

        let titles: Vec<&str> = report.average_likes_per_game.iter().map(|e| e.title.as_str()).collect();
        let expected: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        prop_assert_eq!(titles, expected);
    }

    /// Property: Averages are the rounded-up mean, zero without comments
    #[test]
    fn prop_average_is_ceiling_of_mean(games in catalog()) {
        let report = generate_report(&games);

        for (game, entry) in games.iter().zip(&report.average_likes_per_game) {
            let count = game.comment_count() as i64;
            if count == 0 {
                prop_assert_eq!(entry.average_likes, 0);
            } else {
                let total = game.total_likes();
                prop_assert!(entry.average_likes * count >= total);
                prop_assert!((entry.average_likes - 1) * count < total);
            }
        }
    }

    /// Property: The highest rated game has the largest total, first one wins ties
    #[test]
    fn prop_highest_rated_is_first_maximum(games in catalog()) {
        let report = generate_report(&games);

        match games.iter().map(|g| g.total_likes()).max() {
            None => prop_assert_eq!(report.highest_rated_game, ""),
            Some(best) => {
                let first = games.iter().find(|g| g.total_likes() == best).map(|g| g.title.clone());
                prop_assert_eq!(Some(report.highest_rated_game), first);
            }
        }
    }

    /// Property: The reported user has the most comments, smallest name wins ties
    #[test]
    fn prop_most_commented_user_is_smallest_maximum(games in catalog()) {
        let report = generate_report(&games);
        let counts = comment_counts(&games);

        match counts.values().max() {
            None => prop_assert_eq!(report.user_with_most_comments, ""),
            Some(&best) => {
                let first = counts.iter().find(|(_, &n)| n == best).map(|(user, _)| user.clone());
                prop_assert_eq!(Some(report.user_with_most_comments), first);
            }
        }
    }

    /// Property: Folding in two chunks equals folding at once
    #[test]
    fn prop_fold_is_associative(first in catalog(), second in catalog()) {
        let mut all = first.clone();
        all.extend(second.iter().cloned());

        let at_once = fold_projection(report_projection, ReportAccumulator::new(), &all);
        let halfway = fold_projection(report_projection, ReportAccumulator::new(), &first);
        let chunked = fold_projection(report_projection, halfway, &second);

        prop_assert_eq!(at_once, chunked);
    }

    /// Property: Reports are deterministic
    #[test]
    fn prop_report_is_deterministic(games in catalog()) {
        prop_assert_eq!(generate_report(&games), generate_report(&games));
    }

    /// Property: Both strategies agree up to the order of averages
    #[test]
    fn prop_strategies_agree(games in catalog()) {
        let (streamed, pushed) = both_reports(games);

        prop_assert_eq!(&streamed.user_with_most_comments, &pushed.user_with_most_comments);
        prop_assert_eq!(&streamed.highest_rated_game, &pushed.highest_rated_game);
        prop_assert_eq!(streamed.averages_by_title(), pushed.averages_by_title());
    }

    /// Property: The shared average helper never divides by zero
    #[test]
    fn prop_average_helper_zero_count(total in -1000i64..1000) {
        prop_assert_eq!(average_likes(total, 0), 0);
    }
}
