// Copyright (c) 2025 - Cowboy AI, Inc.
//! Catalog Domain Models
//!
//! - [`Game`] - a catalog entry carrying its comments
//! - [`Comment`] - a user comment with a like count
//! - [`CommentDate`] - comment timestamp with calendar-date wire encoding
//! - [`Report`] - the aggregate statistics produced per invocation

pub mod game;
pub mod report;

pub use game::{Comment, CommentDate, Game};
pub use report::{average_likes, GameAverageLikes, Report};
