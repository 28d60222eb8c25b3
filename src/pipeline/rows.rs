// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed result rows of the standard pipelines

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CatalogError, CatalogResult};

use super::Row;

/// Result row of [`Pipeline::comments_per_user`](super::Pipeline::comments_per_user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCommentCount {
    pub user: String,
    pub number_of_comments: i64,
}

/// Result row of [`Pipeline::likes_per_game`](super::Pipeline::likes_per_game)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLikeTotals {
    pub position: i64,
    pub title: String,
    pub comment_count: i64,
    pub total_likes: i64,
    pub average_likes: i64,
}

/// Decode result rows into typed records
///
/// A missing or mistyped field fails the whole decode rather than being
/// defaulted.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> CatalogResult<Vec<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(Value::Object(row))
                .map_err(|e| CatalogError::Decode(format!("row {}: {}", i, e)))
        })
        .collect()
}
