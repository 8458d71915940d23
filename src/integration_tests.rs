// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Cross-family pipeline properties.
//!
//! The per-module tests cover each policy in isolation; the tests here pin the
//! contract shared by every family and arity: full-context accumulation,
//! first-error termination, and agreement between the stream and future kinds.
//!
//! The context-accumulation checks use steps that return `sum(args) + 1`
//! starting from `1`: with the full context present, stage `k` produces `2^k`,
//! so a truncated or duplicated context changes the final value.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::StreamExt;

use crate::errors::FlowError;
use crate::{future, sources, stream};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn collect_single(pipeline: stream::FlowStream<i64, FlowError>) -> Vec<Result<i64, FlowError>> {
    pipeline.collect().await
}

#[tokio::test]
async fn stream_merge_accumulates_context_at_every_arity() {
    init_tracing();
    let one = || sources::value::<i64, FlowError>(1);

    let results = collect_single(stream::flat_map1(one, |a| sources::value(a + 1))).await;
    assert_eq!(results, vec![Ok(2)]);

    let results = collect_single(stream::flat_map2(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(4)]);

    let results = collect_single(stream::flat_map3(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(8)]);

    let results = collect_single(stream::flat_map4(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(16)]);

    let results = collect_single(stream::flat_map5(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(32)]);

    let results = collect_single(stream::flat_map6(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
        |a, b, c, d, f, g| sources::value(a + b + c + d + f + g + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(64)]);

    let results = collect_single(stream::flat_map7(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
        |a, b, c, d, f, g| sources::value(a + b + c + d + f + g + 1),
        |a, b, c, d, f, g, h| sources::value(a + b + c + d + f + g + h + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(128)]);

    let results = collect_single(stream::flat_map8(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
        |a, b, c, d, f, g| sources::value(a + b + c + d + f + g + 1),
        |a, b, c, d, f, g, h| sources::value(a + b + c + d + f + g + h + 1),
        |a, b, c, d, f, g, h, i| sources::value(a + b + c + d + f + g + h + i + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(256)]);

    let results = collect_single(stream::flat_map9(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
        |a, b, c, d, f, g| sources::value(a + b + c + d + f + g + 1),
        |a, b, c, d, f, g, h| sources::value(a + b + c + d + f + g + h + 1),
        |a, b, c, d, f, g, h, i| sources::value(a + b + c + d + f + g + h + i + 1),
        |a, b, c, d, f, g, h, i, j| sources::value(a + b + c + d + f + g + h + i + j + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(512)]);
}

#[tokio::test]
async fn concat_accumulates_context_at_max_arity() {
    let one = || sources::value::<i64, FlowError>(1);

    let results = collect_single(stream::concat_map9(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
        |a, b, c, d| sources::value(a + b + c + d + 1),
        |a, b, c, d, f| sources::value(a + b + c + d + f + 1),
        |a, b, c, d, f, g| sources::value(a + b + c + d + f + g + 1),
        |a, b, c, d, f, g, h| sources::value(a + b + c + d + f + g + h + 1),
        |a, b, c, d, f, g, h, i| sources::value(a + b + c + d + f + g + h + i + 1),
        |a, b, c, d, f, g, h, i, j| sources::value(a + b + c + d + f + g + h + i + j + 1),
    ))
    .await;
    assert_eq!(results, vec![Ok(512)]);
}

#[tokio::test]
async fn stream_policies_agree_on_single_valued_stages() {
    // With exactly one value per stage there is never a second branch, so all
    // three policies must produce the same result.
    let one = || sources::value::<i64, FlowError>(1);

    let merged = collect_single(stream::flat_map3(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
    ))
    .await;
    let concatenated = collect_single(stream::concat_map3(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
    ))
    .await;
    let switched = collect_single(stream::switch_map3(
        one,
        |a| sources::value(a + 1),
        |a, b| sources::value(a + b + 1),
        |a, b, c| sources::value(a + b + c + 1),
    ))
    .await;

    assert_eq!(merged, vec![Ok(8)]);
    assert_eq!(merged, concatenated);
    assert_eq!(merged, switched);
}

#[tokio::test]
async fn future_accumulates_context_at_every_arity() {
    let one = || sources::ready::<i64, FlowError>(1);

    assert_eq!(future::flat_map1(one, |a| sources::ready(a + 1)).await, Ok(2));
    assert_eq!(
        future::flat_map2(one, |a| sources::ready(a + 1), |a, b| sources::ready(a + b + 1)).await,
        Ok(4)
    );
    assert_eq!(
        future::flat_map3(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
        )
        .await,
        Ok(8)
    );
    assert_eq!(
        future::flat_map4(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
        )
        .await,
        Ok(16)
    );
    assert_eq!(
        future::flat_map5(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
            |a, b, c, d, f| sources::ready(a + b + c + d + f + 1),
        )
        .await,
        Ok(32)
    );
    assert_eq!(
        future::flat_map6(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
            |a, b, c, d, f| sources::ready(a + b + c + d + f + 1),
            |a, b, c, d, f, g| sources::ready(a + b + c + d + f + g + 1),
        )
        .await,
        Ok(64)
    );
    assert_eq!(
        future::flat_map7(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
            |a, b, c, d, f| sources::ready(a + b + c + d + f + 1),
            |a, b, c, d, f, g| sources::ready(a + b + c + d + f + g + 1),
            |a, b, c, d, f, g, h| sources::ready(a + b + c + d + f + g + h + 1),
        )
        .await,
        Ok(128)
    );
    assert_eq!(
        future::flat_map8(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
            |a, b, c, d, f| sources::ready(a + b + c + d + f + 1),
            |a, b, c, d, f, g| sources::ready(a + b + c + d + f + g + 1),
            |a, b, c, d, f, g, h| sources::ready(a + b + c + d + f + g + h + 1),
            |a, b, c, d, f, g, h, i| sources::ready(a + b + c + d + f + g + h + i + 1),
        )
        .await,
        Ok(256)
    );
    assert_eq!(
        future::flat_map9(
            one,
            |a| sources::ready(a + 1),
            |a, b| sources::ready(a + b + 1),
            |a, b, c| sources::ready(a + b + c + 1),
            |a, b, c, d| sources::ready(a + b + c + d + 1),
            |a, b, c, d, f| sources::ready(a + b + c + d + f + 1),
            |a, b, c, d, f, g| sources::ready(a + b + c + d + f + g + 1),
            |a, b, c, d, f, g, h| sources::ready(a + b + c + d + f + g + h + 1),
            |a, b, c, d, f, g, h, i| sources::ready(a + b + c + d + f + g + h + i + 1),
            |a, b, c, d, f, g, h, i, j| sources::ready(a + b + c + d + f + g + h + i + j + 1),
        )
        .await,
        Ok(512)
    );
}

#[tokio::test]
async fn mid_chain_failure_skips_remaining_steps() {
    init_tracing();
    let later_calls = Arc::new(AtomicUsize::new(0));
    let four_calls = later_calls.clone();
    let five_calls = later_calls.clone();

    let results: Vec<_> = stream::flat_map5(
        || sources::value::<i64, FlowError>(1),
        |a| sources::value(a + 1),
        |_a, _b| sources::value(0),
        |_a, _b, _c| sources::fail::<i64, _>(FlowError::stage("three", "boom")),
        move |_a, _b, _c, _d| {
            four_calls.fetch_add(1, Ordering::SeqCst);
            sources::value(0)
        },
        move |_a, _b, _c, _d, _f| {
            five_calls.fetch_add(1, Ordering::SeqCst);
            sources::value(0)
        },
    )
    .collect()
    .await;

    assert_eq!(results, vec![Err(FlowError::stage("three", "boom"))]);
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn merge_result_set_is_complete_without_order_guarantee() {
    let mut results: Vec<_> = stream::flat_map1(
        || sources::iter::<_, _, FlowError>(vec![1, 2]),
        |n: i64| sources::value(n),
    )
    .collect()
    .await;
    results.sort_by_key(|r| r.clone().unwrap_or(i64::MAX));
    assert_eq!(results, vec![Ok(1), Ok(2)]);
}

#[tokio::test]
async fn channel_backed_pipeline_drains_and_completes() {
    let (tx, rx) = tokio::sync::mpsc::channel(8);
    let sender = tokio::spawn(async move {
        for n in 1..=3i64 {
            tx.send(n).await.expect("receiver alive");
        }
    });

    let results: Vec<_> = stream::concat_map1(
        move || sources::from_channel::<_, FlowError>(rx),
        |n| sources::value(n * 2),
    )
    .collect()
    .await;

    sender.await.expect("sender task");
    assert_eq!(results, vec![Ok(2), Ok(4), Ok(6)]);
}
