// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Projection System
//!
//! Projections are pure functions `(State, &Item) → State`. Replaying a
//! corpus is a fold of its items through the projection function, which
//! keeps the aggregation logic free of I/O and trivially testable.
//!
//! ```text
//! (State, Item) ──project()──> State'
//!
//! [g1, g2, g3] ──fold──> final State ──finish()──> Output
//! ```

use std::fmt::Debug;

/// Pure projection function type
///
/// Takes the current state and one item, returns the new state.
pub type PureProjection<S, E> = fn(S, &E) -> S;

/// Trait for pure projection state
///
/// Projection state must be cloneable, debuggable and default constructible.
pub trait ProjectionState: Clone + Debug + Default {}

impl<T: Clone + Debug + Default> ProjectionState for T {}

/// Fold a sequence of items through a pure projection
///
/// Items are applied exactly once, in iteration order.
pub fn fold_projection<'a, S, E, I>(projection: PureProjection<S, E>, initial_state: S, items: I) -> S
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
{
    items
        .into_iter()
        .fold(initial_state, |state, item| projection(state, item))
}
