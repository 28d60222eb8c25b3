// Copyright (c) 2025 - Cowboy AI, Inc.
//! Game and Comment entities
//!
//! These are read-only inputs to the report engine. They are owned and
//! mutated by the catalog management side and only ever read here.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Title, used as the grouping label in reports
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Author or publisher
    #[serde(default)]
    pub by: String,
    /// Supported platforms; order carries no meaning
    #[serde(default)]
    pub platform: Vec<String>,
    #[serde(default)]
    pub age_rating: String,
    /// Denormalized like counter on the game itself (not used by reports)
    #[serde(default)]
    pub likes: i64,
    /// Comments in posting order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Game {
    /// Create a game with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            by: String::new(),
            platform: Vec::new(),
            age_rating: String::new(),
            likes: 0,
            comments: Vec::new(),
        }
    }

    /// Add a comment, builder style
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Sum of the like counts of all comments on this game
    ///
    /// Negative like counts are summed as given. The sum saturates at the
    /// `i64` bounds instead of wrapping.
    pub fn total_likes(&self) -> i64 {
        self.comments
            .iter()
            .fold(0i64, |total, c| total.saturating_add(c.like))
    }

    /// Number of comments on this game
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// A user comment on a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Name of the posting user
    pub user: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "dateCreated")]
    pub date_created: CommentDate,
    /// Like count; expected non-negative but not validated
    #[serde(default)]
    pub like: i64,
}

impl Comment {
    /// Create a comment with an empty message
    pub fn new(user: impl Into<String>, like: i64, date_created: CommentDate) -> Self {
        Self {
            user: user.into(),
            message: String::new(),
            date_created,
            like,
        }
    }

    /// Set the message text
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Comment creation timestamp
///
/// Encoded in JSON as a calendar date (`YYYY-MM-DD`, UTC). Decodes from that
/// form or from integer Unix-epoch seconds, which is how stores keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommentDate(DateTime<Utc>);

impl CommentDate {
    /// Date format used on the wire
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Wrap a timestamp
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// Parse a `YYYY-MM-DD` date at midnight UTC
    pub fn parse(date: &str) -> Result<Self, chrono::ParseError> {
        let day = NaiveDate::parse_from_str(date, Self::FORMAT)?;
        Ok(Self(Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))))
    }

    /// Build from Unix-epoch seconds
    pub fn from_epoch_seconds(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }

    /// Unix-epoch seconds
    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Underlying timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for CommentDate {
    fn default() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for CommentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for CommentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CommentDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CommentDateVisitor)
    }
}

struct CommentDateVisitor;

impl<'de> Visitor<'de> for CommentDateVisitor {
    type Value = CommentDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YYYY-MM-DD date string or epoch seconds")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        CommentDate::parse(value)
            .map_err(|e| E::custom(format!("invalid date '{}': {}", value, e)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        CommentDate::from_epoch_seconds(value)
            .ok_or_else(|| E::custom(format!("epoch seconds out of range: {}", value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let seconds = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch seconds out of range: {}", value)))?;
        self.visit_i64(seconds)
    }
}
