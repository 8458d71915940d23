// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Cooperative cancellation for composed pipelines.
//!
//! Dropping a pipeline already cancels it, transitively through every live
//! continuation. This adapter covers the case where the code that wants to
//! cancel is not the code holding the stream: the pipeline ends as soon as the
//! [`CancellationToken`] fires, and ends *cleanly*. Cancellation is a normal
//! end of stream, never an `Err`, so it stays distinguishable from failure.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::stream::{Stream, StreamExt};
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::stream::FlowStream;

/// Tie a pipeline's lifetime to a cancellation token.
///
/// When `token` is cancelled, the inner pipeline is dropped on the next poll
/// and the stream ends. Values already emitted are unaffected.
pub fn cancellable<T, E>(pipeline: FlowStream<T, E>, token: CancellationToken) -> FlowStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Box::pin(Cancellable {
        cancelled: Box::pin(token.cancelled_owned()),
        inner: Some(pipeline),
    })
}

struct Cancellable<T, E> {
    cancelled: BoxFuture<'static, ()>,
    inner: Option<FlowStream<T, E>>,
}

impl<T, E> Stream for Cancellable<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.inner.is_some() && this.cancelled.poll_unpin(cx).is_ready() {
            tracing::trace!("pipeline cancelled; dropping in-flight continuations");
            this.inner = None;
        }
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_next_unpin(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some(item)),
            Poll::Ready(None) => {
                this.inner = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
