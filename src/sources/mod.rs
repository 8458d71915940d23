// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Producer constructors.
//!
//! Small entry points for the zero-argument producer slot of every composer,
//! and for step functions that wrap plain values. Everything here is lazy:
//! constructing a source performs no work until the pipeline is polled.

use futures::future;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::future::FlowFuture;
use crate::stream::FlowStream;

/// Single-shot value that resolves immediately with `Ok(value)`.
pub fn ready<T, E>(value: T) -> FlowFuture<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    future::ok(value).boxed()
}

/// Single-shot value that resolves immediately with `Err(error)`.
pub fn fail_future<T, E>(error: E) -> FlowFuture<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    future::err(error).boxed()
}

/// Stream that emits exactly one `Ok(value)` and completes.
pub fn value<T, E>(value: T) -> FlowStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    stream::once(future::ok(value)).boxed()
}

/// Stream that emits exactly one `Err(error)` and completes.
pub fn fail<T, E>(error: E) -> FlowStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    stream::once(future::err(error)).boxed()
}

/// Stream that completes without emitting anything.
pub fn empty<T, E>() -> FlowStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    stream::empty().boxed()
}

/// Stream over a collection of plain values.
pub fn iter<I, T, E>(values: I) -> FlowStream<T, E>
where
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    stream::iter(values.into_iter().map(Ok)).boxed()
}

/// Stream over a collection of results, emitted as-is.
///
/// Composers treat the first `Err` as terminal, so anything after it in
/// `results` is never observed downstream.
pub fn try_iter<I, T, E>(results: I) -> FlowStream<T, E>
where
    I: IntoIterator<Item = Result<T, E>>,
    I::IntoIter: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    stream::iter(results).boxed()
}

/// Bridge a tokio mpsc receiver into a pipeline producer.
///
/// The stream ends when every sender is dropped.
pub fn from_channel<T, E>(receiver: mpsc::Receiver<T>) -> FlowStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    stream::unfold(receiver, |mut rx| async move {
        rx.recv().await.map(|item| (Ok(item), rx))
    })
    .boxed()
}
