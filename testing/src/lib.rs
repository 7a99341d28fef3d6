//! # Culinary Blog Testing
//!
//! Testing utilities for the culinary blog reducers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness that can also reduce the
//!   completions a step's requests produce
//! - [`assertions`]: request counts and generation stamps
//! - [`run_effects`]: drives effect futures to completion without a store,
//!   so a test can feed the produced actions back by hand
//!
//! ## Example
//!
//! ```ignore
//! use culinary_blog_testing::run_effects;
//!
//! let mut state = FeedState::default();
//! let effects = reducer.reduce(&mut state, FeedAction::Load, &env);
//!
//! for action in run_effects(effects).await {
//!     reducer.reduce(&mut state, action, &env);
//! }
//! assert!(state.posts.data().is_some());
//! ```

use culinary_blog_core::effect::Effect;
use futures::future::join_all;

pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Execute effects and collect the actions they produce
///
/// `Parallel` effects are flattened and every future is awaited
/// concurrently. Actions are returned in effect order, not completion order;
/// futures that yield `None` contribute nothing.
pub async fn run_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut futures = Vec::new();
    let mut pending: Vec<Effect<A>> = effects.into_iter().collect();
    pending.reverse();

    while let Some(effect) = pending.pop() {
        match effect {
            Effect::None => {},
            Effect::Future(fut) => futures.push(fut),
            Effect::Parallel(nested) => pending.extend(nested.into_iter().rev()),
        }
    }

    join_all(futures).await.into_iter().flatten().collect()
}
