// Copyright (c) 2025 - Cowboy AI, Inc.
//! Report value produced by the aggregation engine

use serde::{Deserialize, Serialize};

/// Aggregate statistics over the whole catalog
///
/// Built fresh for every invocation. Field names are the ones exposed to
/// serializers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// User with the most comments across all games, or empty
    pub user_with_most_comments: String,
    /// Title of the game with the highest total likes, or empty
    pub highest_rated_game: String,
    /// One entry per input game
    pub average_likes_per_game: Vec<GameAverageLikes>,
}

impl Report {
    /// True when no statistic has been populated
    pub fn is_empty(&self) -> bool {
        self.user_with_most_comments.is_empty()
            && self.highest_rated_game.is_empty()
            && self.average_likes_per_game.is_empty()
    }

    /// Average-likes entries ordered by title, then value
    ///
    /// Strategies emit entries in different orders; this gives a canonical
    /// view for comparing them.
    pub fn averages_by_title(&self) -> Vec<GameAverageLikes> {
        let mut entries = self.average_likes_per_game.clone();
        entries.sort_by(|a, b| {
            a.title
                .cmp(&b.title)
                .then(a.average_likes.cmp(&b.average_likes))
        });
        entries
    }
}

/// Average likes per comment for one game
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameAverageLikes {
    pub title: String,
    pub average_likes: i64,
}

/// Ceiling of `total_likes / comment_count`, or 0 for a game with no comments
pub fn average_likes(total_likes: i64, comment_count: usize) -> i64 {
    if comment_count == 0 {
        return 0;
    }
    let count = i128::try_from(comment_count).unwrap_or(i128::MAX);
    // ceil(a / b) == -floor(-a / b) for b > 0; |result| <= |a| fits in i64
    let average = -(-i128::from(total_likes)).div_euclid(count);
    i64::try_from(average).unwrap_or(if average < 0 { i64::MIN } else { i64::MAX })
}
