// Copyright (c) 2025 - Cowboy AI, Inc.
//! Strategy Equivalence Tests
//!
//! Streaming and pushdown must agree on every report field; only the order
//! of the average-likes entries may differ.

mod fixtures;

use fixtures::*;
use game_catalog::aggregator::{
    AverageOrdering, PushdownAggregator, ReportAggregator, StreamingAggregator,
};
use game_catalog::domain::Game;
use game_catalog::projection::generate_report;
use game_catalog::store::InMemoryCatalog;
use pretty_assertions::assert_eq;

fn catalogs() -> Vec<(&'static str, Vec<Game>)> {
    vec![
        ("empty", Vec::new()),
        ("single", vec![dummy()]),
        ("pair", vec![dummy(), solitary_voyage()]),
        ("mixed", mixed_catalog()),
        (
            "negative likes",
            vec![
                game_commented_by("Grim", "Tyler Ramos", 2, -3),
                game_commented_by("Grimmer", "Courtney Knapp", 1, -1),
            ],
        ),
        (
            "all silent",
            vec![silent_game("Quiet Harbor"), silent_game("Still Water")],
        ),
    ]
}

#[tokio::test]
async fn strategies_agree_on_shared_catalogs() {
    for (label, games) in catalogs() {
        let catalog = InMemoryCatalog::with_games(games);
        let streaming = StreamingAggregator::new(catalog.clone());
        let pushdown = PushdownAggregator::new(catalog);

        let streamed = streaming.generate_report().await.unwrap();
        let pushed = pushdown.generate_report().await.unwrap();

        assert_eq!(
            streamed.user_with_most_comments, pushed.user_with_most_comments,
            "user mismatch for {}",
            label
        );
        assert_eq!(
            streamed.highest_rated_game, pushed.highest_rated_game,
            "game mismatch for {}",
            label
        );
        assert_eq!(
            streamed.averages_by_title(),
            pushed.averages_by_title(),
            "averages mismatch for {}",
            label
        );
    }
}

#[tokio::test]
async fn streaming_matches_synchronous_fold() {
    for (label, games) in catalogs() {
        let expected = generate_report(&games);
        let streamed = StreamingAggregator::new(InMemoryCatalog::with_games(games))
            .generate_report()
            .await
            .unwrap();

        assert_eq!(streamed, expected, "fold mismatch for {}", label);
    }
}

#[test]
fn orderings_are_declared() {
    let catalog = InMemoryCatalog::new();

    assert_eq!(
        StreamingAggregator::new(catalog.clone()).ordering(),
        AverageOrdering::InputOrder
    );
    assert_eq!(
        PushdownAggregator::new(catalog).ordering(),
        AverageOrdering::TotalLikesDescending
    );
}

#[tokio::test]
async fn concurrent_reports_do_not_share_state() {
    let catalog = InMemoryCatalog::with_games(mixed_catalog());
    let aggregator = StreamingAggregator::new(catalog);

    let (first, second) = tokio::join!(aggregator.generate_report(), aggregator.generate_report());

    assert_eq!(first.unwrap(), second.unwrap());
}
