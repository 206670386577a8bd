// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `FlatMap(f, parallelism)`: emits each element of `f(x)` in order; empty
//! sequences are dropped (§4.C).

use flowcraft_core::{channel, require, Flow, Result, DEFAULT_CAPACITY};

/// Builds a `FlatMap` flow.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `parallelism` is 0.
pub fn flat_map<I, O, F>(f: F, parallelism: usize, capacity: usize) -> Result<Flow<I, O>>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Vec<O> + Send + Sync + 'static,
{
    require(parallelism >= 1, "FlatMap: parallelism must be at least 1")?;

    if parallelism == 1 {
        Ok(single_threaded(f, capacity))
    } else {
        Ok(flowcraft_parallel::spawn_parallel(f, parallelism, capacity))
    }
}

fn single_threaded<I, O, F>(f: F, capacity: usize) -> Flow<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Vec<O> + Send + Sync + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<O>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            for out in f(item) {
                if out_send.send(out).await.is_err() {
                    return;
                }
            }
        }
    });

    Flow::from_parts(in_send, out_recv)
}
