// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Cancel-on-new flattening.
//!
//! The `futures` crate ships merge-all and ordered flattening but has no
//! switch equivalent, so this combinator is written by hand. At most one
//! continuation is live at a time: whenever the upstream produces a new value,
//! the continuation for the previous value is dropped mid-flight; in Rust,
//! dropping a stream *is* cancelling it, transitively through everything the
//! stream owns. Continuations that already finished emitting are unaffected.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{Stream, StreamExt};

use crate::stream::FlowStream;

/// Stream adapter implementing the cancel-on-new policy.
///
/// `upstream` yields the continuation stream for each upstream value (the step
/// function has already been applied via `map_ok`). The adapter drains the
/// upstream before polling the active continuation so that the newest branch
/// always wins, even when several upstream values arrive in one poll.
pub(crate) struct Switch<T, E> {
    upstream: Option<FlowStream<FlowStream<T, E>, E>>,
    active: Option<FlowStream<T, E>>,
}

impl<T, E> Switch<T, E> {
    pub(crate) fn new(upstream: FlowStream<FlowStream<T, E>, E>) -> Self {
        Self {
            upstream: Some(upstream),
            active: None,
        }
    }
}

impl<T, E> Stream for Switch<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            let Some(upstream) = this.upstream.as_mut() else {
                break;
            };
            match upstream.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(branch))) => {
                    if this.active.is_some() {
                        tracing::trace!("superseding in-flight continuation");
                    }
                    this.active = Some(branch);
                }
                Poll::Ready(Some(Err(err))) => {
                    this.upstream = None;
                    this.active = None;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    this.upstream = None;
                }
                Poll::Pending => break,
            }
        }

        match this.active.as_mut() {
            Some(branch) => match branch.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(value))) => Poll::Ready(Some(Ok(value))),
                Poll::Ready(Some(Err(err))) => {
                    this.upstream = None;
                    this.active = None;
                    Poll::Ready(Some(Err(err)))
                }
                Poll::Ready(None) => {
                    this.active = None;
                    if this.upstream.is_none() {
                        Poll::Ready(None)
                    } else {
                        Poll::Pending
                    }
                }
                Poll::Pending => Poll::Pending,
            },
            None => {
                if this.upstream.is_none() {
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                }
            }
        }
    }
}
