// Copyright (c) 2025 - Cowboy AI, Inc.

//! In-process projection of a game corpus into a [`Report`](crate::domain::Report)
//!
//! The streaming strategy is a fold of the corpus through a pure projection:
//!
//! ```text
//! Corpus ──fold(report_projection)──> ReportAccumulator ──finish()──> Report
//!    │                                      │
//!    ▼                                      ▼
//! [g1, g2, g3]                 users / most liked / averages
//! ```
//!
//! Folding the empty corpus yields the zero-valued report, and folding a
//! corpus in two halves from the intermediate state gives the same result
//! as folding it at once.
//!
//! # Example
//!
//! ```rust
//! use game_catalog::domain::{Comment, CommentDate, Game};
//! use game_catalog::projection::generate_report;
//!
//! let date = CommentDate::parse("2004-03-19").unwrap();
//! let games = vec![Game::new("Dummy")
//!     .with_comment(Comment::new("Jacqueline Dodson", 5, date))
//!     .with_comment(Comment::new("Courtney Knapp", 1, date))];
//!
//! let report = generate_report(&games);
//! assert_eq!(report.highest_rated_game, "Dummy");
//! assert_eq!(report.average_likes_per_game[0].average_likes, 3);
//! ```

pub mod pure;
pub mod report;

pub use pure::{fold_projection, ProjectionState, PureProjection};
pub use report::{generate_report, report_projection, MostLiked, ReportAccumulator};
