// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Flowcraft
//!
//! A library for building and running bounded in-process streaming
//! dataflow pipelines. A graph is assembled from three kinds of stages —
//! **sources** (produce elements), **flows** (transform elements) and
//! **sinks** (consume elements) — and the runtime streams elements through
//! the graph concurrently, honoring backpressure, graceful termination and
//! time-windowing semantics.
//!
//! ## Quick start
//!
//! ```
//! use flowcraft::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = source_from_iter(vec!["a", "b", "c"], 1);
//! let upper = map(|s: &str| s.to_uppercase(), 1, 1).unwrap();
//! let (sink, collected) = collect::<String>(1);
//!
//! source.via(upper).to(sink).await;
//! assert_eq!(collected.wait().await, vec!["A", "B", "C"]);
//! # }
//! ```
//!
//! ## Layout
//!
//! This crate is a facade over the component crates that implement each
//! concern:
//!
//! - [`flowcraft_core`] — stage contracts (`Source`/`Flow`/`Sink`), the
//!   bounded channel, the cancellation token and the error hierarchy.
//! - [`flowcraft_ops`] — `Map`, `FlatMap`, `Filter`, `PassThrough`.
//! - [`flowcraft_parallel`] — the order-preserving parallel engine backing
//!   the element-wise operators above when built with parallelism > 1.
//! - [`flowcraft_fanout`] — `Split`, `FanOut`, `RoundRobin`, `Merge`,
//!   `ZipWith`, `Flatten`.
//! - [`flowcraft_window`] — `Tumbling`, `Sliding` (processing- and
//!   event-time), `Session`.
//! - [`flowcraft_agg`] — `Reduce`, `Fold`.
//! - [`flowcraft_throttle`] — the rate-limiting `Throttler`.
//! - [`flowcraft_runtime`] — ready-made sink constructors and `Pipeline`,
//!   the cancellation-aware harness for driving a graph run to completion.

// Stage contracts, channel, cancellation, errors, timestamps.
pub use flowcraft_core::{
    channel, do_stream, do_stream_cancellable, new_completion, require, source_from_iter,
    CancellationToken, CompletionFuture, EventTime, Flow, FlowError, Receiver, Result, Sender,
    Sink, Source, Timed, TimestampExtractor, DEFAULT_CAPACITY,
};

// Element-wise operators (§4.C).
pub use flowcraft_ops::{filter, flat_map, map, pass_through};

// The order-preserving parallel engine (§4.D), for callers building a
// custom operator on top of it rather than using Map/FlatMap/Filter.
pub use flowcraft_parallel::spawn_parallel;

// Fan-out / fan-in (§4.E).
pub use flowcraft_fanout::{fan_out, flatten, merge, round_robin, split, zip_with, Split};

// Windowing (§4.F).
pub use flowcraft_window::{session, sliding_event_time, sliding_processing_time, tumbling};

// Aggregation (§4.G).
pub use flowcraft_agg::{fold, reduce};

// Rate control (§4.H).
pub use flowcraft_throttle::{throttle, ThrottleMode};

// Execution harness (§4.J).
pub use flowcraft_runtime::{collect, for_each, CollectedHandle, Pipeline};

/// Convenience glob import covering every stage type and operator
/// constructor this crate re-exports.
pub mod prelude {
    pub use crate::{
        channel, collect, do_stream, do_stream_cancellable, fan_out, filter, flat_map, flatten,
        fold, for_each, map, merge, new_completion, pass_through, reduce, require, round_robin,
        session, sliding_event_time, sliding_processing_time, source_from_iter, spawn_parallel,
        split, throttle, tumbling, zip_with, CancellationToken, CollectedHandle, CompletionFuture,
        EventTime, Flow, FlowError, Pipeline, Receiver, Result, Sender, Sink, Source, Split,
        ThrottleMode, Timed, TimestampExtractor, DEFAULT_CAPACITY,
    };
}
