// Copyright (c) 2025 - Cowboy AI, Inc.

//! Neo4j Catalog Adapter
//!
//! Stores the catalog as a graph and serves both report strategies from it.
//!
//! # Graph Model
//!
//! ## Nodes
//! - **Game**: `title`, `description`, `by`, `platform`, `age_rating`,
//!   `likes`, `position` (insertion order)
//! - **Comment**: `user`, `message`, `date_created` (epoch seconds), `like`,
//!   `position` (order within its game)
//! - **CatalogSequence**: `name`, `next` (next free game position)
//!
//! ## Relationships
//! - `(Game)-[:HAS_COMMENT]->(Comment)`
//!
//! # Strategies
//!
//! - Streaming: [`GameCorpusSource`] runs one `MATCH` and decodes rows as the
//!   stream is polled, so a connection failure mid-way surfaces as an error
//!   item.
//! - Pushdown: [`AggregationStore`] compiles the pipelines with
//!   [`cypher::compile`] and runs them in one transaction, letting Neo4j
//!   group and sort.
//!
//! # Example
//!
//! ```rust,no_run
//! use game_catalog::adapters::Neo4jCatalog;
//! use game_catalog::aggregator::{PushdownAggregator, ReportAggregator};
//! use game_catalog::config::Neo4jConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Neo4jCatalog::new(Neo4jConfig::default()).await?;
//!     catalog.initialize().await?;
//!
//!     let report = PushdownAggregator::new(catalog).generate_report().await?;
//!     println!("{}", report.highest_rated_game);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use neo4rs::{Graph, Query, Row as GraphRow};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Neo4jConfig;
use crate::domain::{Comment, CommentDate, Game};
use crate::errors::{CatalogError, CatalogResult};
use crate::pipeline::{cypher, Pipeline, Row};
use crate::store::{AggregationStore, GameCorpusSource, GameStream};

const FETCH_ALL_GAMES: &str = r#"
MATCH (g:Game)
OPTIONAL MATCH (g)-[:HAS_COMMENT]->(c:Comment)
WITH g, c ORDER BY g.position, c.position
WITH g, collect(c {.user, .message, .date_created, .like}) AS comments
RETURN g.title AS title, g.description AS description, g.by AS by,
       g.platform AS platform, g.age_rating AS age_rating, g.likes AS likes,
       comments
ORDER BY g.position
"#;

/// Creates a game and all of its comments in one statement
///
/// The position comes from the `CatalogSequence` counter. Incrementing it
/// write-locks the counter node, so concurrent inserts get distinct
/// positions. Comments hang off the bound `g`, never a re-matched position.
const INSERT_GAME: &str = r#"
MERGE (seq:CatalogSequence {name: 'game'})
ON CREATE SET seq.next = 0
SET seq.next = seq.next + 1
WITH seq.next - 1 AS position
CREATE (g:Game {
    title: $title,
    description: $description,
    by: $by,
    platform: $platform,
    age_rating: $age_rating,
    likes: $likes,
    position: position
})
FOREACH (i IN range(0, size($users) - 1) |
    CREATE (g)-[:HAS_COMMENT]->(:Comment {
        user: $users[i],
        message: $messages[i],
        date_created: $dates[i],
        like: $comment_likes[i],
        position: i
    })
)
RETURN position
"#;

/// Comment as stored on a `Comment` node
#[derive(Debug, Deserialize)]
struct CommentRecord {
    user: Option<String>,
    message: Option<String>,
    date_created: Option<i64>,
    like: Option<i64>,
}

/// Neo4j-backed catalog
pub struct Neo4jCatalog {
    graph: Arc<Graph>,
    config: Neo4jConfig,
}

impl Neo4jCatalog {
    /// Connect to Neo4j
    pub async fn new(config: Neo4jConfig) -> CatalogResult<Self> {
        info!("Connecting to Neo4j at {}", config.uri);

        let graph = Graph::new(&config.uri, &config.user, &config.password)
            .await
            .map_err(|e| {
                CatalogError::DataAccess(format!("Failed to connect to Neo4j: {}", e))
            })?;

        Ok(Self {
            graph: Arc::new(graph),
            config,
        })
    }

    /// Connection settings in use
    pub fn config(&self) -> &Neo4jConfig {
        &self.config
    }

    /// Create the constraints and indexes the catalog relies on; safe to call repeatedly
    pub async fn initialize(&self) -> CatalogResult<()> {
        info!("Initializing Neo4j schema for the game catalog");

        let statements = [
            "CREATE CONSTRAINT game_position_unique IF NOT EXISTS FOR (g:Game) REQUIRE g.position IS UNIQUE",
            "CREATE CONSTRAINT catalog_sequence_name IF NOT EXISTS FOR (s:CatalogSequence) REQUIRE s.name IS UNIQUE",
            "CREATE INDEX game_title IF NOT EXISTS FOR (g:Game) ON (g.title)",
            "CREATE INDEX comment_user IF NOT EXISTS FOR (c:Comment) ON (c.user)",
        ];

        for statement in statements {
            self.graph
                .run(Query::new(statement.to_string()))
                .await
                .map_err(|e| CatalogError::DataAccess(format!("schema setup failed: {}", e)))?;
        }

        info!("Neo4j schema initialization complete");
        Ok(())
    }

    /// Verify connectivity
    pub async fn health_check(&self) -> CatalogResult<()> {
        self.graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| {
                CatalogError::DataAccess(format!("Neo4j health check failed: {}", e))
            })?;

        debug!("Neo4j health check passed");
        Ok(())
    }

    /// Append a game, and its comments, at the end of the corpus
    ///
    /// The game and its comments are written atomically.
    pub async fn insert_game(&self, game: &Game) -> CatalogResult<i64> {
        let users: Vec<String> = game.comments.iter().map(|c| c.user.clone()).collect();
        let messages: Vec<String> = game.comments.iter().map(|c| c.message.clone()).collect();
        let dates: Vec<i64> = game
            .comments
            .iter()
            .map(|c| c.date_created.epoch_seconds())
            .collect();
        let likes: Vec<i64> = game.comments.iter().map(|c| c.like).collect();

        let query = Query::new(INSERT_GAME.to_string())
            .param("title", game.title.as_str())
            .param("description", game.description.as_str())
            .param("by", game.by.as_str())
            .param("platform", game.platform.clone())
            .param("age_rating", game.age_rating.as_str())
            .param("likes", game.likes)
            .param("users", users)
            .param("messages", messages)
            .param("dates", dates)
            .param("comment_likes", likes);

        let mut result = self.graph.execute(query).await?;
        let position: i64 = match result.next().await? {
            Some(row) => row
                .get("position")
                .map_err(|e| CatalogError::Decode(format!("game position: {}", e)))?,
            None => return Err(CatalogError::Query("game insert returned no row".to_string())),
        };
        while result.next().await?.is_some() {}

        debug!(
            "Inserted game '{}' at position {} with {} comments",
            game.title,
            position,
            game.comments.len()
        );
        Ok(position)
    }

    /// Delete every game and comment
    pub async fn reset(&self) -> CatalogResult<()> {
        warn!("Resetting Neo4j catalog - ALL GAMES WILL BE DELETED");

        self.graph
            .run(Query::new(
                "MATCH (n) WHERE n:Game OR n:Comment OR n:CatalogSequence DETACH DELETE n"
                    .to_string(),
            ))
            .await?;

        info!("Neo4j catalog reset complete");
        Ok(())
    }
}

fn decode_game(row: &GraphRow) -> CatalogResult<Game> {
    let title: String = row
        .get("title")
        .map_err(|e| CatalogError::Decode(format!("game title: {}", e)))?;
    let records: Vec<CommentRecord> = row
        .get("comments")
        .map_err(|e| CatalogError::Decode(format!("comments of '{}': {}", title, e)))?;

    let comments = records
        .into_iter()
        .map(|record| {
            let date_created = match record.date_created {
                Some(seconds) => CommentDate::from_epoch_seconds(seconds).ok_or_else(|| {
                    CatalogError::Decode(format!("comment date out of range: {}", seconds))
                })?,
                None => CommentDate::default(),
            };
            Ok(Comment {
                user: record.user.unwrap_or_default(),
                message: record.message.unwrap_or_default(),
                date_created,
                like: record.like.unwrap_or(0),
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(Game {
        description: row.get("description").unwrap_or_default(),
        by: row.get("by").unwrap_or_default(),
        platform: row.get("platform").unwrap_or_default(),
        age_rating: row.get("age_rating").unwrap_or_default(),
        likes: row.get("likes").unwrap_or(0),
        title,
        comments,
    })
}

#[async_trait]
impl GameCorpusSource for Neo4jCatalog {
    async fn fetch_all_games(&self) -> CatalogResult<GameStream<'_>> {
        debug!("Fetching all games from Neo4j");

        let rows = self
            .graph
            .execute(Query::new(FETCH_ALL_GAMES.to_string()))
            .await?;

        let games = stream::try_unfold(rows, |mut rows| async move {
            match rows.next().await? {
                Some(row) => Ok::<_, CatalogError>(Some((decode_game(&row)?, rows))),
                None => Ok(None),
            }
        });

        Ok(games.boxed())
    }

    fn name(&self) -> &str {
        "neo4j-catalog"
    }
}

#[async_trait]
impl AggregationStore for Neo4jCatalog {
    async fn aggregate_all(&self, pipelines: &[Pipeline]) -> CatalogResult<Vec<Vec<Row>>> {
        let compiled = pipelines
            .iter()
            .map(cypher::compile)
            .collect::<CatalogResult<Vec<_>>>()?;

        // all pipelines share one transaction
        let mut txn = self.graph.start_txn().await?;
        let mut results = Vec::with_capacity(compiled.len());

        for (pipeline, query) in pipelines.iter().zip(compiled) {
            debug!("Running pipeline '{}' as Cypher:\n{}", pipeline.name, query.text);

            let mut stream = txn.execute(Query::new(query.text)).await?;
            let mut rows = Vec::new();

            while let Some(graph_row) = stream.next(txn.handle()).await? {
                let mut row = Row::new();
                for column in &query.columns {
                    let value: serde_json::Value = graph_row.get(column).map_err(|e| {
                        CatalogError::Decode(format!(
                            "column '{}' of pipeline '{}': {}",
                            column, pipeline.name, e
                        ))
                    })?;
                    row.insert(column.clone(), value);
                }
                rows.push(row);
            }
            results.push(rows);
        }

        txn.commit().await?;
        Ok(results)
    }

    fn name(&self) -> &str {
        "neo4j-catalog"
    }
}
