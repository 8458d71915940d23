// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Context-free pipeline stage abstractions.
//!
//! A transformer maps one whole async value to another. Unlike a step function,
//! which is invoked per upstream value with the full accumulated context, a
//! transformer sees only the immediately prior stream or future and can be
//! reused at any position where the types line up. The `compose` families in
//! [`crate::stream`] and [`crate::future`] chain transformers left to right,
//! and a mismatched type chain is rejected at compile time.
//!
//! Both traits are blanket-implemented for closures, so a plain function works
//! anywhere a transformer is expected:
//!
//! ```rust
//! use futures::{StreamExt, TryStreamExt};
//! use letflow::{sources, stream, FlowError, FlowStream};
//!
//! fn add_one(input: FlowStream<i32, FlowError>) -> FlowStream<i32, FlowError> {
//!     input.map_ok(|n| n + 1).boxed()
//! }
//!
//! fn double(input: FlowStream<i32, FlowError>) -> FlowStream<i32, FlowError> {
//!     input.map_ok(|n| n * 2).boxed()
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let results: Vec<_> = stream::compose2(|| sources::value(5), add_one, double)
//!     .collect()
//!     .await;
//! assert_eq!(results, vec![Ok(12)]);
//! # }
//! ```

use crate::future::FlowFuture;
use crate::stream::FlowStream;

/// A reusable, context-free stage over a multi-valued async value.
pub trait StreamTransform<In, Out, E> {
    /// Consume the transformer and apply it to `input`.
    fn apply(self, input: FlowStream<In, E>) -> FlowStream<Out, E>;
}

impl<F, In, Out, E> StreamTransform<In, Out, E> for F
where
    F: FnOnce(FlowStream<In, E>) -> FlowStream<Out, E>,
{
    fn apply(self, input: FlowStream<In, E>) -> FlowStream<Out, E> {
        self(input)
    }
}

/// A reusable, context-free stage over a single-shot async value.
pub trait FutureTransform<In, Out, E> {
    /// Consume the transformer and apply it to `input`.
    fn apply(self, input: FlowFuture<In, E>) -> FlowFuture<Out, E>;
}

impl<F, In, Out, E> FutureTransform<In, Out, E> for F
where
    F: FnOnce(FlowFuture<In, E>) -> FlowFuture<Out, E>,
{
    fn apply(self, input: FlowFuture<In, E>) -> FlowFuture<Out, E> {
        self(input)
    }
}
