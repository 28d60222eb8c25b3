// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory pipeline evaluator
//!
//! Executes a [`Pipeline`] over a materialized corpus. This is the query
//! engine behind [`InMemoryCatalog`](crate::store::InMemoryCatalog) and the
//! reference the other store translations are checked against.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::{average_likes, Game};
use crate::errors::{CatalogError, CatalogResult};

use super::{
    fields, lookup, Accumulator, Expr, GroupKey, NamedAccumulator, Pipeline, Predicate,
    Projection, Row, SortDirection, SortKey, Stage,
};

/// Run a pipeline over a corpus
pub fn evaluate(pipeline: &Pipeline, games: &[Game]) -> CatalogResult<Vec<Row>> {
    let rows = corpus_rows(games)?;
    evaluate_rows(pipeline, rows)
}

/// Run a pipeline over already prepared rows
pub fn evaluate_rows(pipeline: &Pipeline, mut rows: Vec<Row>) -> CatalogResult<Vec<Row>> {
    for stage in &pipeline.stages {
        rows = match stage {
            Stage::Unwind {
                path,
                preserve_empty,
            } => unwind(rows, path, *preserve_empty),
            Stage::Match(predicate) => rows
                .into_iter()
                .filter(|row| matches(row, predicate))
                .collect(),
            Stage::Group { key, accumulators } => group(rows, key, accumulators)?,
            Stage::Project(projections) => project(rows, projections)?,
            Stage::Sort(keys) => {
                let mut rows = rows;
                rows.sort_by(|a, b| compare_rows(a, b, keys));
                rows
            }
            Stage::Limit(n) => {
                let mut rows = rows;
                rows.truncate(*n);
                rows
            }
        };
    }
    Ok(rows)
}

/// One row per game, tagged with its corpus position
pub fn corpus_rows(games: &[Game]) -> CatalogResult<Vec<Row>> {
    games
        .iter()
        .enumerate()
        .map(|(position, game)| {
            let mut row = match serde_json::to_value(game)? {
                Value::Object(map) => map,
                other => {
                    return Err(CatalogError::Serialization(format!(
                        "game did not serialize to an object: {}",
                        other
                    )))
                }
            };
            row.insert(fields::POSITION.to_string(), Value::from(position));
            Ok(row)
        })
        .collect()
}

fn unwind(rows: Vec<Row>, path: &str, preserve_empty: bool) -> Vec<Row> {
    let mut out = Vec::with_capacity(rows.len());
    for mut row in rows {
        match row.remove(path) {
            Some(Value::Array(items)) if !items.is_empty() => {
                for item in items {
                    let mut unwound = row.clone();
                    unwound.insert(path.to_string(), item);
                    out.push(unwound);
                }
            }
            Some(Value::Array(_)) | Some(Value::Null) | None => {
                if preserve_empty {
                    out.push(row);
                }
            }
            Some(scalar) => {
                row.insert(path.to_string(), scalar);
                out.push(row);
            }
        }
    }
    out
}

fn matches(row: &Row, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Exists(path) => lookup(row, path).is_some(),
    }
}

fn integer(value: &Value, field: &str) -> CatalogResult<i64> {
    value.as_i64().ok_or_else(|| {
        CatalogError::Query(format!("field '{}' is not an integer: {}", field, value))
    })
}

fn group(
    rows: Vec<Row>,
    key: &[GroupKey],
    accumulators: &[NamedAccumulator],
) -> CatalogResult<Vec<Row>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Row, Vec<i64>)> = Vec::new();

    for row in &rows {
        let mut key_row = Map::new();
        for k in key {
            let value = lookup(row, &k.field).cloned().unwrap_or(Value::Null);
            key_row.insert(k.name.clone(), value);
        }
        let signature = serde_json::to_string(&key_row)?;

        let slot = match index.get(&signature) {
            Some(&slot) => slot,
            None => {
                groups.push((key_row, vec![0; accumulators.len()]));
                index.insert(signature, groups.len() - 1);
                groups.len() - 1
            }
        };

        let totals = &mut groups[slot].1;
        for (total, acc) in totals.iter_mut().zip(accumulators) {
            match &acc.op {
                Accumulator::Count { present } => {
                    if lookup(row, present).is_some() {
                        *total = total.saturating_add(1);
                    }
                }
                Accumulator::Sum(field) => {
                    if let Some(value) = lookup(row, field) {
                        *total = total.saturating_add(integer(value, field)?);
                    }
                }
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(mut row, totals)| {
            for (acc, total) in accumulators.iter().zip(totals) {
                row.insert(acc.name.clone(), Value::from(total));
            }
            row
        })
        .collect())
}

fn project(rows: Vec<Row>, projections: &[Projection]) -> CatalogResult<Vec<Row>> {
    rows.into_iter()
        .map(|mut row| {
            for projection in projections {
                let value = match &projection.expr {
                    Expr::Field(path) => lookup(&row, path).cloned().unwrap_or(Value::Null),
                    Expr::CeilDiv {
                        numerator,
                        denominator,
                    } => {
                        let num = lookup(&row, numerator)
                            .map(|v| integer(v, numerator))
                            .transpose()?
                            .unwrap_or(0);
                        let den = lookup(&row, denominator)
                            .map(|v| integer(v, denominator))
                            .transpose()?
                            .unwrap_or(0);
                        let den = usize::try_from(den).map_err(|_| {
                            CatalogError::Query(format!(
                                "field '{}' is negative: {}",
                                denominator, den
                            ))
                        })?;
                        Value::from(average_likes(num, den))
                    }
                };
                row.insert(projection.name.clone(), value);
            }
            Ok(row)
        })
        .collect()
}

fn compare_rows(a: &Row, b: &Row, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_values(lookup(a, &key.field), lookup(b, &key.field));
        let ordering = match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing sorts before everything; numbers before strings
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
            },
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Number(_), _) => Ordering::Less,
            (_, Value::Number(_)) => Ordering::Greater,
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}
