// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cypher translation of pipelines
//!
//! Targets the catalog graph model:
//!
//! ```text
//! (g:Game {title, description, by, platform, age_rating, likes, position})
//!   -[:HAS_COMMENT]->
//! (c:Comment {user, message, date_created, like, position})
//! ```
//!
//! Supported shape: an optional leading `Unwind` of `comments`, then any of
//! `Match`/`Group`/`Project`, then trailing `Sort`/`Limit`. A `Group` must
//! occur before rows are returned, and `Project` must follow it.

use crate::errors::{CatalogError, CatalogResult};

use super::{fields, Accumulator, Expr, Pipeline, Predicate, SortDirection, Stage};

const GAME: &str = "g";
const COMMENT: &str = "c";

enum Scope {
    /// Rows are still `(g)` or `(g, c)` bindings
    Document { unwound: bool },
    /// Rows are the named outputs of a group
    Projected(Vec<String>),
}

impl Scope {
    fn field(&self, path: &str) -> CatalogResult<String> {
        match self {
            Scope::Document { unwound } => {
                let comments_prefix = format!("{}.", fields::COMMENTS);
                if path == fields::COMMENTS {
                    if *unwound {
                        Ok(COMMENT.to_string())
                    } else {
                        Err(unsupported(format!("'{}' used before unwind", path)))
                    }
                } else if let Some(property) = path.strip_prefix(&comments_prefix) {
                    if !*unwound {
                        return Err(unsupported(format!("'{}' used before unwind", path)));
                    }
                    Ok(format!("{}.{}", COMMENT, identifier(property)?))
                } else {
                    Ok(format!("{}.{}", GAME, identifier(path)?))
                }
            }
            Scope::Projected(names) => {
                if names.iter().any(|n| n == path) {
                    Ok(path.to_string())
                } else {
                    Err(unsupported(format!("unknown field '{}' after group", path)))
                }
            }
        }
    }

    fn carry(&self) -> String {
        match self {
            Scope::Document { unwound: true } => format!("{}, {}", GAME, COMMENT),
            Scope::Document { unwound: false } => GAME.to_string(),
            Scope::Projected(names) => names.join(", "),
        }
    }
}

/// A compiled Cypher query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherQuery {
    /// Query text
    pub text: String,
    /// Names of the returned columns, in order
    pub columns: Vec<String>,
}

/// Render a pipeline as a Cypher query
pub fn compile(pipeline: &Pipeline) -> CatalogResult<CypherQuery> {
    let mut clauses = vec![format!("MATCH ({}:Game)", GAME)];
    let mut stages = pipeline.stages.iter().peekable();

    let mut unwound = false;
    if let Some(Stage::Unwind {
        path,
        preserve_empty,
    }) = stages.peek()
    {
        if path != fields::COMMENTS {
            return Err(unsupported(format!("cannot unwind '{}'", path)));
        }
        let keyword = if *preserve_empty { "OPTIONAL MATCH" } else { "MATCH" };
        clauses.push(format!(
            "{} ({})-[:HAS_COMMENT]->({}:Comment)",
            keyword, GAME, COMMENT
        ));
        unwound = true;
        stages.next();
    }

    let mut scope = Scope::Document { unwound };
    let mut order_by: Vec<String> = Vec::new();
    let mut limit: Option<usize> = None;

    for stage in stages {
        let trailing = matches!(stage, Stage::Sort(_) | Stage::Limit(_));
        if (!order_by.is_empty() || limit.is_some()) && !trailing {
            return Err(unsupported("sort and limit must be the last stages".to_string()));
        }

        match stage {
            Stage::Unwind { .. } => {
                return Err(unsupported("only a leading unwind is supported".to_string()))
            }
            Stage::Match(Predicate::Exists(path)) => {
                clauses.push(format!(
                    "WITH {} WHERE {} IS NOT NULL",
                    scope.carry(),
                    scope.field(path)?
                ));
            }
            Stage::Group { key, accumulators } => {
                let mut items = Vec::new();
                let mut names = Vec::new();
                for k in key {
                    items.push(format!("{} AS {}", scope.field(&k.field)?, identifier(&k.name)?));
                    names.push(k.name.clone());
                }
                for acc in accumulators {
                    let expr = match &acc.op {
                        Accumulator::Count { present } => format!("count({})", scope.field(present)?),
                        Accumulator::Sum(field) => format!("sum({})", scope.field(field)?),
                    };
                    items.push(format!("{} AS {}", expr, identifier(&acc.name)?));
                    names.push(acc.name.clone());
                }
                clauses.push(format!("WITH {}", items.join(", ")));
                scope = Scope::Projected(names);
            }
            Stage::Project(projections) => {
                let Scope::Projected(names) = &mut scope else {
                    return Err(unsupported("project must follow a group".to_string()));
                };
                let mut items = Vec::new();
                for projection in projections {
                    let expr = match &projection.expr {
                        Expr::Field(path) => projected(names.as_slice(), path)?,
                        Expr::CeilDiv {
                            numerator,
                            denominator,
                        } => {
                            let n = projected(names.as_slice(), numerator)?;
                            let d = projected(names.as_slice(), denominator)?;
                            format!(
                                "CASE WHEN {d} = 0 THEN 0 ELSE toInteger(ceil(toFloat({n}) / {d})) END"
                            )
                        }
                    };
                    items.push(format!("{} AS {}", expr, identifier(&projection.name)?));
                }
                names.extend(projections.iter().map(|p| p.name.clone()));
                clauses.push(format!("WITH *, {}", items.join(", ")));
            }
            Stage::Sort(keys) => {
                for key in keys {
                    let direction = match key.direction {
                        SortDirection::Ascending => "ASC",
                        SortDirection::Descending => "DESC",
                    };
                    order_by.push(format!("{} {}", scope.field(&key.field)?, direction));
                }
            }
            Stage::Limit(n) => {
                limit = Some(limit.map_or(*n, |current| current.min(*n)));
            }
        }
    }

    let columns = match scope {
        Scope::Projected(names) => names,
        Scope::Document { .. } => {
            return Err(unsupported(format!(
                "pipeline '{}' must group before returning rows",
                pipeline.name
            )))
        }
    };
    clauses.push(format!("RETURN {}", columns.join(", ")));
    if !order_by.is_empty() {
        clauses.push(format!("ORDER BY {}", order_by.join(", ")));
    }
    if let Some(n) = limit {
        clauses.push(format!("LIMIT {}", n));
    }

    Ok(CypherQuery {
        text: clauses.join("\n"),
        columns,
    })
}

fn projected(names: &[String], path: &str) -> CatalogResult<String> {
    if names.iter().any(|n| n == path) {
        Ok(path.to_string())
    } else {
        Err(unsupported(format!("unknown field '{}' after group", path)))
    }
}

fn identifier(name: &str) -> CatalogResult<&str> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(unsupported(format!("invalid identifier '{}'", name)))
    }
}

fn unsupported(message: String) -> CatalogError {
    CatalogError::Query(format!("cannot compile to Cypher: {}", message))
}
