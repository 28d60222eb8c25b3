// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for game-catalog
//!
//! Provides deterministic catalogs for report tests. All dates are fixed
//! constants so reports are reproducible.

#![allow(dead_code)]

use game_catalog::domain::{Comment, CommentDate, Game, Report};

pub const FIRST_POSTED: &str = "2004-03-19";
pub const SECOND_POSTED: &str = "1991-04-12";
pub const THIRD_POSTED: &str = "2001-08-16";

/// Parse a fixed comment date
pub fn date(s: &str) -> CommentDate {
    CommentDate::parse(s).expect("Invalid date in test fixture")
}

/// Comment with a fixed date
pub fn comment(user: &str, like: i64) -> Comment {
    Comment::new(user, like, date(FIRST_POSTED)).with_message("Cool game")
}

/// "Dummy": two comments liked 5 and 1 (total 6, average 3)
pub fn dummy() -> Game {
    let mut game = Game::new("Dummy")
        .with_comment(comment("Jacqueline Dodson", 5))
        .with_comment(Comment::new("Courtney Knapp", 1, date(SECOND_POSTED)).with_message("Meh"));
    game.description = "Nothing special".to_string();
    game.by = "Test Studio".to_string();
    game.platform = vec!["PC".to_string()];
    game.age_rating = "12".to_string();
    game.likes = 10;
    game
}

/// "Solitary Voyage": one comment liked 9
pub fn solitary_voyage() -> Game {
    let mut game = Game::new("Solitary Voyage")
        .with_comment(Comment::new("Tyler Ramos", 9, date(THIRD_POSTED)).with_message("Loved it"));
    game.by = "Lone Harbor".to_string();
    game.platform = vec!["Switch".to_string(), "PS4".to_string()];
    game.age_rating = "7".to_string();
    game
}

/// Game without comments
pub fn silent_game(title: &str) -> Game {
    Game::new(title)
}

/// Game whose comments are all by `user`, each with the same like count
pub fn game_commented_by(title: &str, user: &str, comments: usize, like: i64) -> Game {
    (0..comments).fold(Game::new(title), |game, _| game.with_comment(comment(user, like)))
}

/// Catalog exercising every report field at once
pub fn mixed_catalog() -> Vec<Game> {
    vec![
        dummy(),
        solitary_voyage(),
        silent_game("Quiet Harbor"),
        game_commented_by("Echo Chamber", "Courtney Knapp", 3, 2),
    ]
}

/// Average reported for the first entry with this title
pub fn average_of(report: &Report, title: &str) -> Option<i64> {
    report
        .average_likes_per_game
        .iter()
        .find(|entry| entry.title == title)
        .map(|entry| entry.average_likes)
}
