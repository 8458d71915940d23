// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Error support for composed pipelines.
//!
//! Every composer in this crate is generic over the caller's error type, so a
//! pipeline normally fails with whatever domain error its stages produce. The
//! [`FlowError`] type here is a convenience for pipelines that have no domain
//! error of their own, such as small tools and tests.

use thiserror::Error;

/// Convenience error for pipelines without a domain error type.
///
/// The first `Err` produced anywhere in a pipeline terminates the whole
/// pipeline with that error; remaining stages are never invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A step function reported a failure.
    #[error("stage `{stage}` failed: {message}")]
    Stage {
        /// Name of the failing stage, chosen by the caller.
        stage: String,
        /// Human-readable failure description.
        message: String,
    },
    /// The initial producer failed before any step ran.
    #[error("producer failed: {0}")]
    Producer(String),
}

impl FlowError {
    /// Build a [`FlowError::Stage`] from anything string-like.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
