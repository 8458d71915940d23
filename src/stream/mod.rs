// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Multi-valued pipeline composers.
//!
//! A composer takes a zero-argument producer of the first stream plus a fixed,
//! ordered list of step functions of increasing arity, and returns one
//! [`FlowStream`] describing the whole pipeline. Step `k` receives *every*
//! value produced by stages `0..k`, in production order; its own output extends
//! the context handed to step `k + 1`. Nothing runs until the returned stream
//! is polled.
//!
//! # Families
//!
//! All families share one chaining algorithm (see `policy`); they differ only
//! in how continuations of a multi-valued stage relate to each other:
//!
//! * `flat_map1`..`flat_map9` (merge-all): each upstream value starts its
//!   continuation immediately; branches overlap and no cross-branch ordering
//!   is guaranteed.
//! * `concat_map1`..`concat_map9` (ordered concatenation): continuations
//!   start strictly in trigger order, and a later continuation does not begin
//!   emitting until the earlier one has completed. FIFO results, no overlap.
//! * `switch_map1`..`switch_map9` (cancel-on-new): a newly produced value
//!   drops the continuation still in flight for the previous value; only the
//!   newest branch survives to completion.
//! * `compose1`..`compose9`: context-free [`StreamTransform`] chaining; each
//!   transformer sees only the immediately prior stream, never the context.
//!
//! The first `Err` produced anywhere terminates the pipeline with that error
//! and drops every continuation still in flight. Dropping the returned stream
//! cancels the whole pipeline.
//!
//! Because a multi-valued stage may fan out, every concurrent branch owns a
//! private copy of its context, which is why step functions and context value
//! types carry `Clone` bounds.
//!
//! ```rust
//! use futures::StreamExt;
//! use letflow::{sources, stream, FlowError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // For each base value, look up a scale factor, then combine both.
//! let results: Vec<_> = stream::concat_map2(
//!     || sources::iter::<_, _, FlowError>(vec![1, 2]),
//!     |n| sources::value(n * 10),
//!     |n, scaled| sources::value(n + scaled),
//! )
//! .collect()
//! .await;
//! assert_eq!(results, vec![Ok(11), Ok(22)]);
//! # }
//! ```
//!
//! The arity ceiling of 9 is a limit of the generated dispatch glue, not of
//! the chaining algorithm itself.

mod policy;
mod switch;

use futures::stream::BoxStream;

use crate::traits::StreamTransform;

use self::policy::MergePolicy;

/// A multi-valued asynchronous pipeline value: zero or more eventual results.
///
/// Failure is an `Err` item (terminal by construction in composed pipelines);
/// completion is the end of the stream; cancellation is dropping the stream.
pub type FlowStream<T, E> = BoxStream<'static, Result<T, E>>;

/// Builds the nested continuation chain for one composer body.
///
/// Each level clones the context values and the steps still to come into the
/// continuation closure, so every concurrent branch owns a private context
/// tuple and the enclosing closures stay callable per upstream value. The
/// step that runs next is rebound `mut`, since the level below calls it as
/// `FnMut` through its capture. The freshest value is moved, not cloned, into
/// the final step call.
macro_rules! chain_stages {
    ($policy:expr, ($($ctx:ident),*), $up:expr, [($bind:ident, $step:ident)]) => {
        self::policy::chain($policy, $up, move |$bind| $step($($ctx.clone(),)* $bind))
    };
    ($policy:expr, ($($ctx:ident),*), $up:expr,
     [($bind:ident, $step:ident), ($nbind:ident, $nstep:ident) $(, ($rbind:ident, $rstep:ident))*]) => {
        self::policy::chain($policy, $up, move |$bind| {
            $(let $ctx = $ctx.clone();)*
            let mut $nstep = $nstep.clone();
            $(let $rstep = $rstep.clone();)*
            chain_stages!(
                $policy,
                ($($ctx,)* $bind),
                $step($($ctx.clone(),)* $bind.clone()),
                [($nbind, $nstep) $(, ($rbind, $rstep))*]
            )
        })
    };
}

/// Generates the policy variants of one arity.
///
/// Recurses over the variant list, emitting one function per pass, so the
/// shared producer and step lists are never transcribed inside the variant
/// repetition. The first step parameter is `mut` for the same reason as the
/// rebinds in `chain_stages!`.
macro_rules! stream_arity {
    (
        producer: $p_ty:ident;
        cloned: [$($c_ty:ident),*];
        last: $last_ty:ident;
        steps: [ $($steps:tt)* ];
    ) => {};
    (
        producer: $p_ty:ident;
        cloned: [$($c_ty:ident),*];
        last: $last_ty:ident;
        steps: [ ($bind0:ident, $step0:ident, $step0_ty:ident, ($($in0_ty:ident),+) -> $out0_ty:ident)
                 $(, ($bind:ident, $step:ident, $step_ty:ident, ($($in_ty:ident),+) -> $out_ty:ident) )* ];
        $( #[$doc:meta] )*
        $name:ident => $policy:expr;
        $( $rest:tt )*
    ) => {
        $( #[$doc] )*
        #[allow(clippy::too_many_arguments)]
        pub fn $name<$($c_ty,)* $last_ty, R, E, Z, $step0_ty $(, $step_ty)*>(
            zero: Z,
            mut $step0: $step0_ty,
            $( $step: $step_ty, )*
        ) -> FlowStream<R, E>
        where
            Z: FnOnce() -> FlowStream<$p_ty, E>,
            $step0_ty: FnMut($($in0_ty),+) -> FlowStream<$out0_ty, E> + Clone + Send + 'static,
            $( $step_ty: FnMut($($in_ty),+) -> FlowStream<$out_ty, E> + Clone + Send + 'static, )*
            $( $c_ty: Clone + Send + 'static, )*
            $last_ty: Send + 'static,
            R: Send + 'static,
            E: Send + 'static,
        {
            chain_stages!($policy, (), zero(), [ ($bind0, $step0) $(, ($bind, $step))* ])
        }

        stream_arity! {
            producer: $p_ty;
            cloned: [$($c_ty),*];
            last: $last_ty;
            steps: [ ($bind0, $step0, $step0_ty, ($($in0_ty),+) -> $out0_ty)
                     $(, ($bind, $step, $step_ty, ($($in_ty),+) -> $out_ty) )* ];
            $( $rest )*
        }
    };
}

/// Generates one arity of context-free transformer chaining.
macro_rules! stream_compose {
    (
        $( #[$doc:meta] )*
        $name:ident: <$($mid_ty:ident),*>;
        chain: [ $( ($t:ident, $t_ty:ident, $in_ty:ident -> $out_ty:ident) ),+ ]
    ) => {
        $( #[$doc] )*
        #[allow(clippy::too_many_arguments)]
        pub fn $name<A, $($mid_ty,)* R, E, Z, $($t_ty),+>(
            zero: Z,
            $( $t: $t_ty ),+
        ) -> FlowStream<R, E>
        where
            Z: FnOnce() -> FlowStream<A, E>,
            $( $t_ty: StreamTransform<$in_ty, $out_ty, E>, )+
        {
            let stage = zero();
            $( let stage = $t.apply(stage); )+
            stage
        }
    };
}

stream_arity! {
    producer: A;
    cloned: [];
    last: A;
    steps: [ (a, one, S1, (A) -> R) ];
    /// Merge-all chaining of a producer and one step.
    flat_map1 => MergePolicy::Merge;
    /// Ordered-concatenation chaining of a producer and one step.
    concat_map1 => MergePolicy::Concat;
    /// Cancel-on-new chaining of a producer and one step.
    switch_map1 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A];
    last: B;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> R)
    ];
    /// Merge-all chaining across two context-accumulating steps.
    flat_map2 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across two context-accumulating steps.
    concat_map2 => MergePolicy::Concat;
    /// Cancel-on-new chaining across two context-accumulating steps.
    switch_map2 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B];
    last: C;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> R)
    ];
    /// Merge-all chaining across three context-accumulating steps.
    flat_map3 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across three context-accumulating steps.
    concat_map3 => MergePolicy::Concat;
    /// Cancel-on-new chaining across three context-accumulating steps.
    switch_map3 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C];
    last: D;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> R)
    ];
    /// Merge-all chaining across four context-accumulating steps.
    flat_map4 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across four context-accumulating steps.
    concat_map4 => MergePolicy::Concat;
    /// Cancel-on-new chaining across four context-accumulating steps.
    switch_map4 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C, D];
    last: F;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> F),
        (f, five, S5, (A, B, C, D, F) -> R)
    ];
    /// Merge-all chaining across five context-accumulating steps.
    flat_map5 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across five context-accumulating steps.
    concat_map5 => MergePolicy::Concat;
    /// Cancel-on-new chaining across five context-accumulating steps.
    switch_map5 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C, D, F];
    last: G;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> F),
        (f, five, S5, (A, B, C, D, F) -> G),
        (g, six, S6, (A, B, C, D, F, G) -> R)
    ];
    /// Merge-all chaining across six context-accumulating steps.
    flat_map6 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across six context-accumulating steps.
    concat_map6 => MergePolicy::Concat;
    /// Cancel-on-new chaining across six context-accumulating steps.
    switch_map6 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C, D, F, G];
    last: H;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> F),
        (f, five, S5, (A, B, C, D, F) -> G),
        (g, six, S6, (A, B, C, D, F, G) -> H),
        (h, seven, S7, (A, B, C, D, F, G, H) -> R)
    ];
    /// Merge-all chaining across seven context-accumulating steps.
    flat_map7 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across seven context-accumulating steps.
    concat_map7 => MergePolicy::Concat;
    /// Cancel-on-new chaining across seven context-accumulating steps.
    switch_map7 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C, D, F, G, H];
    last: I;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> F),
        (f, five, S5, (A, B, C, D, F) -> G),
        (g, six, S6, (A, B, C, D, F, G) -> H),
        (h, seven, S7, (A, B, C, D, F, G, H) -> I),
        (i, eight, S8, (A, B, C, D, F, G, H, I) -> R)
    ];
    /// Merge-all chaining across eight context-accumulating steps.
    flat_map8 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across eight context-accumulating steps.
    concat_map8 => MergePolicy::Concat;
    /// Cancel-on-new chaining across eight context-accumulating steps.
    switch_map8 => MergePolicy::Switch;
}

stream_arity! {
    producer: A;
    cloned: [A, B, C, D, F, G, H, I];
    last: J;
    steps: [
        (a, one, S1, (A) -> B),
        (b, two, S2, (A, B) -> C),
        (c, three, S3, (A, B, C) -> D),
        (d, four, S4, (A, B, C, D) -> F),
        (f, five, S5, (A, B, C, D, F) -> G),
        (g, six, S6, (A, B, C, D, F, G) -> H),
        (h, seven, S7, (A, B, C, D, F, G, H) -> I),
        (i, eight, S8, (A, B, C, D, F, G, H, I) -> J),
        (j, nine, S9, (A, B, C, D, F, G, H, I, J) -> R)
    ];
    /// Merge-all chaining across nine context-accumulating steps.
    flat_map9 => MergePolicy::Merge;
    /// Ordered-concatenation chaining across nine context-accumulating steps.
    concat_map9 => MergePolicy::Concat;
    /// Cancel-on-new chaining across nine context-accumulating steps.
    switch_map9 => MergePolicy::Switch;
}

stream_compose! {
    /// Apply one transformer to the produced stream.
    compose1: <>;
    chain: [ (one, T1, A -> R) ]
}

stream_compose! {
    /// Chain two transformers left to right.
    compose2: <B>;
    chain: [ (one, T1, A -> B), (two, T2, B -> R) ]
}

stream_compose! {
    /// Chain three transformers left to right.
    compose3: <B, C>;
    chain: [ (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> R) ]
}

stream_compose! {
    /// Chain four transformers left to right.
    compose4: <B, C, D>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> R)
    ]
}

stream_compose! {
    /// Chain five transformers left to right.
    compose5: <B, C, D, F>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> R)
    ]
}

stream_compose! {
    /// Chain six transformers left to right.
    compose6: <B, C, D, F, G>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> R)
    ]
}

stream_compose! {
    /// Chain seven transformers left to right.
    compose7: <B, C, D, F, G, H>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> R)
    ]
}

stream_compose! {
    /// Chain eight transformers left to right.
    compose8: <B, C, D, F, G, H, I>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> I), (eight, T8, I -> R)
    ]
}

stream_compose! {
    /// Chain nine transformers left to right.
    compose9: <B, C, D, F, G, H, I, J>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> I), (eight, T8, I -> J), (nine, T9, J -> R)
    ]
}
