// Copyright (c) 2025 - Cowboy AI, Inc.
//! Streaming report accumulator
//!
//! Each game is folded in exactly once, in input order. The accumulator is
//! local to a single invocation and discarded after [`ReportAccumulator::finish`].
//!
//! # Tie-breaks
//!
//! - Highest rated game: a later game replaces the candidate only when its
//!   total strictly exceeds the best so far, so the first game wins ties. The
//!   first game of a non-empty corpus always seeds the candidate.
//! - Most commented user: names are scanned in ascending order with a strict
//!   `>`, so the lexicographically smallest name wins ties.

use std::collections::BTreeMap;

use crate::domain::{average_likes, Game, GameAverageLikes, Report};

use super::pure::fold_projection;

/// Best game seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostLiked {
    pub title: String,
    pub total_likes: i64,
}

/// Running state of the streaming report computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportAccumulator {
    comments_per_user: BTreeMap<String, usize>,
    most_liked: Option<MostLiked>,
    average_likes: Vec<GameAverageLikes>,
    games_processed: usize,
}

impl ReportAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one game into the running statistics
    pub fn process_game(&mut self, game: &Game) {
        let total = game.total_likes();

        let replaces = match &self.most_liked {
            Some(best) => total > best.total_likes,
            None => true,
        };
        if replaces {
            self.most_liked = Some(MostLiked {
                title: game.title.clone(),
                total_likes: total,
            });
        }

        self.average_likes.push(GameAverageLikes {
            title: game.title.clone(),
            average_likes: average_likes(total, game.comment_count()),
        });

        for comment in &game.comments {
            *self
                .comments_per_user
                .entry(comment.user.clone())
                .or_insert(0) += 1;
        }

        self.games_processed += 1;
    }

    /// Number of games folded in so far
    pub fn games_processed(&self) -> usize {
        self.games_processed
    }

    /// Comment count recorded for a user
    pub fn comments_by(&self, user: &str) -> usize {
        self.comments_per_user.get(user).copied().unwrap_or(0)
    }

    /// Current highest rated candidate
    pub fn most_liked(&self) -> Option<&MostLiked> {
        self.most_liked.as_ref()
    }

    /// User with the greatest comment count
    pub fn most_commented_user(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (name, &count) in &self.comments_per_user {
            match best {
                Some((_, max)) if count <= max => {}
                _ => best = Some((name.as_str(), count)),
            }
        }
        best
    }

    /// Produce the report
    pub fn finish(self) -> Report {
        let user_with_most_comments = self
            .most_commented_user()
            .map(|(name, _)| name.to_string())
            .unwrap_or_default();

        Report {
            user_with_most_comments,
            highest_rated_game: self.most_liked.map(|m| m.title).unwrap_or_default(),
            average_likes_per_game: self.average_likes,
        }
    }
}

/// Pure projection step for [`fold_projection`]
pub fn report_projection(mut state: ReportAccumulator, game: &Game) -> ReportAccumulator {
    state.process_game(game);
    state
}

/// Compute the report over a materialized corpus
///
/// `average_likes_per_game` keeps the input order.
pub fn generate_report<'a, I>(games: I) -> Report
where
    I: IntoIterator<Item = &'a Game>,
{
    fold_projection(report_projection, ReportAccumulator::new(), games).finish()
}
