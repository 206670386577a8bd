// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The execution harness around a flowcraft graph (§4.J of the design
//! notes): ready-made [`Sink`](flowcraft_core::Sink) constructors and a
//! [`Pipeline`] that bundles a graph run's shared [`CancellationToken`]
//! with the logic to drive it to completion or early cancellation.
//!
//! Building a graph (wiring sources through flows to a sink) stays the job
//! of `flowcraft-core`'s stage contracts and the component operator crates;
//! this crate only covers *running* one.

pub mod pipeline;
pub mod sinks;

pub use flowcraft_core::CancellationToken;
pub use pipeline::Pipeline;
pub use sinks::{collect, for_each, CollectedHandle};
