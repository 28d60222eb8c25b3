// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative aggregation pipelines
//!
//! A [`Pipeline`] describes a pushdown aggregation as plain data. Stores
//! either evaluate it directly ([`eval`]) or translate it into their own
//! query language ([`cypher`]).
//!
//! # Document model
//!
//! Every game enters the pipeline as one row holding the game's fields plus
//! [`fields::POSITION`], its zero-based position in the corpus. Field paths
//! are dotted (`comments.like`).
//!
//! ```text
//! Game rows ─Unwind─> one row per comment ─Group─> per key ─Project─> ─Sort─> ─Limit─>
//! ```
//!
//! # Stage semantics
//!
//! - `Unwind` replaces an array field by each of its elements. With
//!   `preserve_empty`, a row whose array is missing or empty is kept once
//!   with the field removed.
//! - `Match` keeps rows satisfying a predicate.
//! - `Group` emits one row per distinct key, in first-seen order, holding
//!   the key fields and the accumulator outputs.
//! - `Project` appends computed fields; existing fields are kept.
//! - `Sort` is stable; `Limit` truncates.

pub mod cypher;
pub mod eval;
pub mod rows;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use rows::{decode_rows, GameLikeTotals, UserCommentCount};

/// One pipeline row
pub type Row = Map<String, Value>;

/// Field names shared by the standard pipelines and their result rows
pub mod fields {
    /// Zero-based position of a game in the corpus
    pub const POSITION: &str = "position";
    pub const TITLE: &str = "title";
    pub const COMMENTS: &str = "comments";
    pub const COMMENT_USER: &str = "comments.user";
    pub const COMMENT_LIKE: &str = "comments.like";

    pub const USER: &str = "user";
    pub const NUMBER_OF_COMMENTS: &str = "number_of_comments";
    pub const COMMENT_COUNT: &str = "comment_count";
    pub const TOTAL_LIKES: &str = "total_likes";
    pub const AVERAGE_LIKES: &str = "average_likes";
}

/// A pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// One output row per element of an array field
    Unwind {
        path: String,
        preserve_empty: bool,
    },
    /// Keep rows matching a predicate
    Match(Predicate),
    /// Group rows by key fields
    Group {
        key: Vec<GroupKey>,
        accumulators: Vec<NamedAccumulator>,
    },
    /// Append computed fields
    Project(Vec<Projection>),
    /// Stable sort
    Sort(Vec<SortKey>),
    /// Keep the first `n` rows
    Limit(usize),
}

/// Row filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Field is present and not null
    Exists(String),
}

/// A grouping key field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKey {
    /// Output field name
    pub name: String,
    /// Source field path
    pub field: String,
}

/// A named accumulator in a group stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAccumulator {
    pub name: String,
    pub op: Accumulator,
}

/// Group accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulator {
    /// Count rows where the field is present and not null
    Count { present: String },
    /// Integer sum of the field, saturating at the `i64` bounds; absent
    /// values contribute nothing
    Sum(String),
}

/// A computed output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub name: String,
    pub expr: Expr,
}

/// Projection expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Copy of a field
    Field(String),
    /// Integer ceiling of `numerator / denominator`, 0 when the denominator is 0
    CeilDiv {
        numerator: String,
        denominator: String,
    },
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// An ordered list of stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// Create an empty, named pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn unwind(mut self, path: impl Into<String>, preserve_empty: bool) -> Self {
        self.stages.push(Stage::Unwind {
            path: path.into(),
            preserve_empty,
        });
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.stages.push(Stage::Match(predicate));
        self
    }

    pub fn group(mut self, key: Vec<GroupKey>, accumulators: Vec<NamedAccumulator>) -> Self {
        self.stages.push(Stage::Group { key, accumulators });
        self
    }

    pub fn project(mut self, projections: Vec<Projection>) -> Self {
        self.stages.push(Stage::Project(projections));
        self
    }

    pub fn sort(mut self, keys: Vec<SortKey>) -> Self {
        self.stages.push(Stage::Sort(keys));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.stages.push(Stage::Limit(n));
        self
    }

    /// Comment count per user, highest first, top one only
    ///
    /// Ties on the count are ordered by user name ascending. Result rows
    /// decode as [`UserCommentCount`].
    pub fn comments_per_user() -> Self {
        Self::new("comments_per_user")
            .unwind(fields::COMMENTS, true)
            .filter(Predicate::Exists(fields::COMMENTS.to_string()))
            .group(
                vec![GroupKey::new(fields::USER, fields::COMMENT_USER)],
                vec![NamedAccumulator::new(
                    fields::NUMBER_OF_COMMENTS,
                    Accumulator::Count {
                        present: fields::COMMENTS.to_string(),
                    },
                )],
            )
            .sort(vec![
                SortKey::desc(fields::NUMBER_OF_COMMENTS),
                SortKey::asc(fields::USER),
            ])
            .limit(1)
    }

    /// Like totals and averages per game, highest total first
    ///
    /// Games are grouped by corpus position, so same-titled games stay
    /// separate. Ties on the total are ordered by position. Result rows
    /// decode as [`GameLikeTotals`].
    pub fn likes_per_game() -> Self {
        Self::new("likes_per_game")
            .unwind(fields::COMMENTS, true)
            .group(
                vec![
                    GroupKey::new(fields::POSITION, fields::POSITION),
                    GroupKey::new(fields::TITLE, fields::TITLE),
                ],
                vec![
                    NamedAccumulator::new(
                        fields::COMMENT_COUNT,
                        Accumulator::Count {
                            present: fields::COMMENTS.to_string(),
                        },
                    ),
                    NamedAccumulator::new(
                        fields::TOTAL_LIKES,
                        Accumulator::Sum(fields::COMMENT_LIKE.to_string()),
                    ),
                ],
            )
            .project(vec![Projection {
                name: fields::AVERAGE_LIKES.to_string(),
                expr: Expr::CeilDiv {
                    numerator: fields::TOTAL_LIKES.to_string(),
                    denominator: fields::COMMENT_COUNT.to_string(),
                },
            }])
            .sort(vec![
                SortKey::desc(fields::TOTAL_LIKES),
                SortKey::asc(fields::POSITION),
            ])
    }
}

impl GroupKey {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

impl NamedAccumulator {
    pub fn new(name: impl Into<String>, op: Accumulator) -> Self {
        Self {
            name: name.into(),
            op,
        }
    }
}

/// Look up a dotted path in a row
pub fn lookup<'a>(row: &'a Row, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = row.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
