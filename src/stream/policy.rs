// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! The shared stage-chaining algorithm and its injectable merge policy.
//!
//! Every multi-valued composer in this crate reduces to the same operation:
//! attach one step function to an upstream stream, deciding how continuations
//! started for different upstream values relate to each other. That decision is
//! the [`MergePolicy`]; [`chain`] is the single algorithm the public arity
//! surface dispatches through.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{Stream, StreamExt, TryStreamExt};

use crate::stream::switch::Switch;
use crate::stream::FlowStream;

/// How continuations of one stage relate when the stage is multi-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergePolicy {
    /// Start every continuation as soon as its triggering value arrives.
    /// Continuations overlap freely; no cross-branch ordering is guaranteed.
    Merge,
    /// Start continuations strictly in trigger order. A later continuation
    /// does not begin until the earlier one has finished emitting.
    Concat,
    /// A newly produced value cancels the continuation still in flight for
    /// the previous value; only the newest branch survives.
    Switch,
}

/// Chain one step onto `upstream` under the given policy.
///
/// The step is invoked once per upstream `Ok` value, at the moment that value
/// is delivered during polling. An `Err` anywhere terminates the composed
/// stream with that error and drops every in-flight continuation.
pub(crate) fn chain<T, U, E, F>(
    policy: MergePolicy,
    upstream: FlowStream<T, E>,
    step: F,
) -> FlowStream<U, E>
where
    T: Send + 'static,
    U: Send + 'static,
    E: Send + 'static,
    F: FnMut(T) -> FlowStream<U, E> + Send + 'static,
{
    tracing::trace!(?policy, "chaining stage");
    match policy {
        MergePolicy::Merge => Box::pin(TerminateOnError::new(
            upstream.map_ok(step).try_flatten_unordered(None).boxed(),
        )),
        MergePolicy::Concat => Box::pin(TerminateOnError::new(
            upstream.map_ok(step).try_flatten().boxed(),
        )),
        MergePolicy::Switch => Box::pin(Switch::new(upstream.map_ok(step).boxed())),
    }
}

/// Enforces terminal-error semantics on top of the flatten combinators.
///
/// The first `Err` item ends the stream; the underlying machinery is dropped
/// on the spot, which cancels every continuation still in flight.
struct TerminateOnError<T, E> {
    inner: Option<FlowStream<T, E>>,
}

impl<T, E> TerminateOnError<T, E> {
    fn new(inner: FlowStream<T, E>) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<T, E> Stream for TerminateOnError<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_next_unpin(cx) {
            Poll::Ready(Some(Err(err))) => {
                tracing::trace!("stage failed; dropping in-flight continuations");
                this.inner = None;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(Some(Ok(value))) => Poll::Ready(Some(Ok(value))),
            Poll::Ready(None) => {
                this.inner = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
