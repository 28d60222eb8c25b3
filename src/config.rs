// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{CatalogError, CatalogResult};

/// Where the catalog lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Memory,
    Neo4j,
}

impl FromStr for Backend {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "neo4j" => Ok(Backend::Neo4j),
            other => Err(CatalogError::Configuration(format!(
                "unknown backend '{}' (expected memory or neo4j)",
                other
            ))),
        }
    }
}

/// Which report strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Streaming,
    Pushdown,
}

impl FromStr for Strategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streaming" => Ok(Strategy::Streaming),
            "pushdown" => Ok(Strategy::Pushdown),
            other => Err(CatalogError::Configuration(format!(
                "unknown strategy '{}' (expected streaming or pushdown)",
                other
            ))),
        }
    }
}

/// Configuration for Neo4j connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Neo4j URI (e.g., "bolt://localhost:7687")
    pub uri: String,

    /// Username for authentication
    pub user: String,

    /// Password for authentication
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
        }
    }
}

/// Report service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub backend: Backend,
    pub strategy: Strategy,
    /// JSON array of games loaded into the backend at startup
    pub seed_path: Option<PathBuf>,
    /// Deadline for one report, corpus fetch included
    pub fetch_timeout: Duration,
    pub neo4j: Neo4jConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            strategy: Strategy::Streaming,
            seed_path: None,
            fetch_timeout: Duration::from_secs(10),
            neo4j: Neo4jConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> CatalogResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("CATALOG_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        let strategy = match lookup("CATALOG_STRATEGY") {
            Some(value) => value.parse()?,
            None => defaults.strategy,
        };

        let fetch_timeout = match lookup("CATALOG_FETCH_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    CatalogError::Configuration(format!(
                        "CATALOG_FETCH_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        value
                    ))
                })?;
                if secs == 0 {
                    return Err(CatalogError::Configuration(
                        "CATALOG_FETCH_TIMEOUT_SECS must be positive".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.fetch_timeout,
        };

        let neo4j = Neo4jConfig {
            uri: lookup("NEO4J_URI").unwrap_or(defaults.neo4j.uri),
            user: lookup("NEO4J_USER").unwrap_or(defaults.neo4j.user),
            password: lookup("NEO4J_PASSWORD").unwrap_or(defaults.neo4j.password),
        };

        Ok(Self {
            backend,
            strategy,
            seed_path: lookup("CATALOG_SEED_PATH").map(PathBuf::from),
            fetch_timeout,
            neo4j,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CatalogConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.strategy, Strategy::Streaming);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            ("CATALOG_BACKEND", "Neo4j"),
            ("CATALOG_STRATEGY", "pushdown"),
            ("CATALOG_FETCH_TIMEOUT_SECS", "3"),
            ("CATALOG_SEED_PATH", "/tmp/games.json"),
            ("NEO4J_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.backend, Backend::Neo4j);
        assert_eq!(config.strategy, Strategy::Pushdown);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/games.json")));
        assert_eq!(config.neo4j.password, "secret");
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        for pairs in [
            [("CATALOG_STRATEGY", "parallel")],
            [("CATALOG_BACKEND", "mongo")],
            [("CATALOG_FETCH_TIMEOUT_SECS", "soon")],
            [("CATALOG_FETCH_TIMEOUT_SECS", "0")],
        ] {
            let err = CatalogConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, CatalogError::Configuration(_)), "{:?}", pairs);
        }
    }
}
