// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made [`Sink`] constructors (§4.J of the design notes): `collect`
//! gathers every received element into a `Vec`, `for_each` calls a user
//! callback per element. Both are thin wrappers around [`Sink::from_parts`]
//! — the same construction path any external sink adapter uses (§6) — not a
//! new stage kind.

use std::sync::Arc;

use flowcraft_core::{channel, new_completion, CompletionFuture, Sink, DEFAULT_CAPACITY};
use parking_lot::Mutex;

/// A handle to the `Vec<I>` a [`collect`] sink is filling, awaitable once
/// the sink's inbound channel has closed and drained.
pub struct CollectedHandle<I> {
    completion: CompletionFuture,
    items: Arc<Mutex<Vec<I>>>,
}

impl<I: Send + 'static> CollectedHandle<I> {
    /// Waits for the sink to complete, then returns everything it collected.
    pub async fn wait(self) -> Vec<I> {
        self.completion.await;
        std::mem::take(&mut *self.items.lock())
    }
}

/// Builds a sink that appends every received element to an internal buffer,
/// in arrival order, and exposes it through the returned [`CollectedHandle`]
/// once the sink completes (§4.I: completion fires exactly once, after
/// inbound close and full drain).
pub fn collect<I>(capacity: usize) -> (Sink<I>, CollectedHandle<I>)
where
    I: Send + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (done_tx, completion) = new_completion();
    let items = Arc::new(Mutex::new(Vec::new()));
    let items_task = items.clone();

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            items_task.lock().push(item);
        }
        let _ = done_tx.send(());
    });

    (
        Sink::from_parts(in_send, completion.clone()),
        CollectedHandle { completion, items },
    )
}

/// Builds a sink that calls `f` once per received element, in arrival order,
/// then signals completion.
pub fn for_each<I, F>(f: F, capacity: usize) -> Sink<I>
where
    I: Send + 'static,
    F: FnMut(I) + Send + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (done_tx, completion) = new_completion();
    let mut f = f;

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            f(item);
        }
        let _ = done_tx.send(());
    });

    Sink::from_parts(in_send, completion)
}
