// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

//! Single-shot pipeline composers.
//!
//! The single-shot counterpart of [`crate::stream`]: a producer plus steps of
//! increasing arity, each step awaited with the full accumulated context and
//! `?`-propagation of the first failure. Because a single-shot stage produces
//! exactly one value, there is never more than one continuation in flight, so
//! the three continuation policies coincide here; `concat_mapN` and
//! `switch_mapN` are aliases of `flat_mapN` to keep the naming surface uniform
//! with the stream side.
//!
//! Composition is fully lazy: even the producer is not invoked until the
//! returned future is awaited. Dropping the future cancels the pipeline.
//!
//! ```rust
//! use letflow::{future, sources, FlowError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = future::flat_map2(
//!     || sources::ready::<_, FlowError>(5),
//!     |n| sources::ready(n + 1),
//!     |n, m| sources::ready(n * m),
//! );
//! assert_eq!(pipeline.await, Ok(30));
//! # }
//! ```

use futures::future::BoxFuture;

use crate::traits::FutureTransform;

/// A single-shot asynchronous pipeline value: exactly one eventual `Result`.
///
/// Failure is `Err`; cancellation is dropping the future.
pub type FlowFuture<T, E> = BoxFuture<'static, Result<T, E>>;

/// Generates one arity of single-shot chaining plus its policy aliases.
///
/// Intermediate context values are cloned into every later step call except
/// the final one, which receives the originals by move.
macro_rules! future_arity {
    (
        $( #[$doc:meta] )*
        $name:ident, aliases: [$($alias:ident),*];
        producer: $p_bind:ident : $p_ty:ident;
        cloned: [$($c_ty:ident),*];
        last: $last_ty:ident;
        steps: [ $( ($step:ident, $step_ty:ident, ($($in_ty:ident),+), ($($arg:ident),+) -> $out_bind:ident : $out_ty:ident) ),* ];
        finish: ($fstep:ident, $fstep_ty:ident, ($($fin_ty:ident),+), ($($farg:ident),+))
    ) => {
        $( #[$doc] )*
        #[allow(clippy::too_many_arguments)]
        pub fn $name<$($c_ty,)* $last_ty, R, E, Z, $($step_ty,)* $fstep_ty>(
            zero: Z,
            $( $step: $step_ty, )*
            $fstep: $fstep_ty,
        ) -> FlowFuture<R, E>
        where
            Z: FnOnce() -> FlowFuture<$p_ty, E> + Send + 'static,
            $( $step_ty: FnOnce($($in_ty),+) -> FlowFuture<$out_ty, E> + Send + 'static, )*
            $fstep_ty: FnOnce($($fin_ty),+) -> FlowFuture<R, E> + Send + 'static,
            $( $c_ty: Clone + Send + 'static, )*
            $last_ty: Send + 'static,
            R: Send + 'static,
            E: Send + 'static,
        {
            Box::pin(async move {
                let $p_bind = zero().await?;
                $( let $out_bind = $step($($arg.clone()),+).await?; )*
                $fstep($($farg),+).await
            })
        }

        $( pub use self::$name as $alias; )*
    };
}

/// Generates one arity of context-free transformer chaining.
macro_rules! future_compose {
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
        ) -> FlowFuture<R, E>
        where
            Z: FnOnce() -> FlowFuture<A, E>,
            $( $t_ty: FutureTransform<$in_ty, $out_ty, E>, )+
        {
            let stage = zero();
            $( let stage = $t.apply(stage); )+
            stage
        }
    };
}

future_arity! {
    /// Chain a producer and one step.
    flat_map1, aliases: [concat_map1, switch_map1];
    producer: a: A;
    cloned: [];
    last: A;
    steps: [];
    finish: (one, S1, (A), (a))
}

future_arity! {
    /// Chain a producer and two context-accumulating steps.
    flat_map2, aliases: [concat_map2, switch_map2];
    producer: a: A;
    cloned: [A];
    last: B;
    steps: [ (one, S1, (A), (a) -> b : B) ];
    finish: (two, S2, (A, B), (a, b))
}

future_arity! {
    /// Chain a producer and three context-accumulating steps.
    flat_map3, aliases: [concat_map3, switch_map3];
    producer: a: A;
    cloned: [A, B];
    last: C;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C)
    ];
    finish: (three, S3, (A, B, C), (a, b, c))
}

future_arity! {
    /// Chain a producer and four context-accumulating steps.
    flat_map4, aliases: [concat_map4, switch_map4];
    producer: a: A;
    cloned: [A, B, C];
    last: D;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D)
    ];
    finish: (four, S4, (A, B, C, D), (a, b, c, d))
}

future_arity! {
    /// Chain a producer and five context-accumulating steps.
    flat_map5, aliases: [concat_map5, switch_map5];
    producer: a: A;
    cloned: [A, B, C, D];
    last: F;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D),
        (four, S4, (A, B, C, D), (a, b, c, d) -> f : F)
    ];
    finish: (five, S5, (A, B, C, D, F), (a, b, c, d, f))
}

future_arity! {
    /// Chain a producer and six context-accumulating steps.
    flat_map6, aliases: [concat_map6, switch_map6];
    producer: a: A;
    cloned: [A, B, C, D, F];
    last: G;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D),
        (four, S4, (A, B, C, D), (a, b, c, d) -> f : F),
        (five, S5, (A, B, C, D, F), (a, b, c, d, f) -> g : G)
    ];
    finish: (six, S6, (A, B, C, D, F, G), (a, b, c, d, f, g))
}

future_arity! {
    /// Chain a producer and seven context-accumulating steps.
    flat_map7, aliases: [concat_map7, switch_map7];
    producer: a: A;
    cloned: [A, B, C, D, F, G];
    last: H;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D),
        (four, S4, (A, B, C, D), (a, b, c, d) -> f : F),
        (five, S5, (A, B, C, D, F), (a, b, c, d, f) -> g : G),
        (six, S6, (A, B, C, D, F, G), (a, b, c, d, f, g) -> h : H)
    ];
    finish: (seven, S7, (A, B, C, D, F, G, H), (a, b, c, d, f, g, h))
}

future_arity! {
    /// Chain a producer and eight context-accumulating steps.
    flat_map8, aliases: [concat_map8, switch_map8];
    producer: a: A;
    cloned: [A, B, C, D, F, G, H];
    last: I;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D),
        (four, S4, (A, B, C, D), (a, b, c, d) -> f : F),
        (five, S5, (A, B, C, D, F), (a, b, c, d, f) -> g : G),
        (six, S6, (A, B, C, D, F, G), (a, b, c, d, f, g) -> h : H),
        (seven, S7, (A, B, C, D, F, G, H), (a, b, c, d, f, g, h) -> i : I)
    ];
    finish: (eight, S8, (A, B, C, D, F, G, H, I), (a, b, c, d, f, g, h, i))
}

future_arity! {
    /// Chain a producer and nine context-accumulating steps.
    flat_map9, aliases: [concat_map9, switch_map9];
    producer: a: A;
    cloned: [A, B, C, D, F, G, H, I];
    last: J;
    steps: [
        (one, S1, (A), (a) -> b : B),
        (two, S2, (A, B), (a, b) -> c : C),
        (three, S3, (A, B, C), (a, b, c) -> d : D),
        (four, S4, (A, B, C, D), (a, b, c, d) -> f : F),
        (five, S5, (A, B, C, D, F), (a, b, c, d, f) -> g : G),
        (six, S6, (A, B, C, D, F, G), (a, b, c, d, f, g) -> h : H),
        (seven, S7, (A, B, C, D, F, G, H), (a, b, c, d, f, g, h) -> i : I),
        (eight, S8, (A, B, C, D, F, G, H, I), (a, b, c, d, f, g, h, i) -> j : J)
    ];
    finish: (nine, S9, (A, B, C, D, F, G, H, I, J), (a, b, c, d, f, g, h, i, j))
}

future_compose! {
    /// Apply one transformer to the produced future.
    compose1: <>;
    chain: [ (one, T1, A -> R) ]
}

future_compose! {
    /// Chain two transformers left to right.
    compose2: <B>;
    chain: [ (one, T1, A -> B), (two, T2, B -> R) ]
}

future_compose! {
    /// Chain three transformers left to right.
    compose3: <B, C>;
    chain: [ (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> R) ]
}

future_compose! {
    /// Chain four transformers left to right.
    compose4: <B, C, D>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> R)
    ]
}

future_compose! {
    /// Chain five transformers left to right.
    compose5: <B, C, D, F>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> R)
    ]
}

future_compose! {
    /// Chain six transformers left to right.
    compose6: <B, C, D, F, G>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> R)
    ]
}

future_compose! {
    /// Chain seven transformers left to right.
    compose7: <B, C, D, F, G, H>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> R)
    ]
}

future_compose! {
    /// Chain eight transformers left to right.
    compose8: <B, C, D, F, G, H, I>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> I), (eight, T8, I -> R)
    ]
}

future_compose! {
    /// Chain nine transformers left to right.
    compose9: <B, C, D, F, G, H, I, J>;
    chain: [
        (one, T1, A -> B), (two, T2, B -> C), (three, T3, C -> D),
        (four, T4, D -> F), (five, T5, F -> G), (six, T6, G -> H),
        (seven, T7, H -> I), (eight, T8, I -> J), (nine, T9, J -> R)
    ]
}
