// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Growing-context async pipeline combinators.
//!
//! `letflow` builds one asynchronous pipeline value out of a fixed, ordered list
//! of asynchronous step functions, where each step after the first receives, as
//! arguments, *all* previously produced values, not just the immediately
//! preceding one. The crate never executes anything itself: composing returns a
//! description (a boxed stream or future) that only runs once the caller polls
//! or awaits it.
//!
//! Two capability kinds are supported, mirroring the split between a value that
//! resolves exactly once and one that may emit many values over time:
//!
//! * [`future::FlowFuture`]: a single eventual `Result`
//! * [`stream::FlowStream`]: zero or more eventual `Result` items
//!
//! For multi-valued stages, three continuation policies decide what happens
//! when a stage produces a new value while earlier continuations are in flight:
//! merge-all ([`stream::flat_map2`] and friends), ordered concatenation
//! ([`stream::concat_map2`]), and cancel-on-new ([`stream::switch_map2`]).
//! Context-free pipeline stages are chained with the `compose` family instead.
//!
//! ```rust
//! use futures::StreamExt;
//! use letflow::{sources, stream, FlowError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = stream::flat_map2(
//!     || sources::value::<_, FlowError>(2),
//!     |n| sources::value(n * 10),
//!     |n, tens| sources::value(n + tens),
//! );
//! let results: Vec<_> = pipeline.collect().await;
//! assert_eq!(results, vec![Ok(22)]);
//! # }
//! ```

pub mod cancel;  // cooperative cancellation adapter
pub mod errors;  // error handling
pub mod future;  // single-shot composers
pub mod sources; // producer constructors
pub mod stream;  // multi-valued composers
pub mod traits;  // transformer abstractions

#[cfg(test)]
mod integration_tests;

pub use cancel::cancellable;
pub use errors::FlowError;
pub use future::FlowFuture;
pub use stream::FlowStream;
pub use traits::{FutureTransform, StreamTransform};
