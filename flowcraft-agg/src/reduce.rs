// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Reduce(f: (A,A)->A)`: emits the running reduction on each input (§4.G).
//!
//! Stateful, so always parallelism 1 — higher parallelism is undefined for
//! this operator (§9, Open Questions).

use flowcraft_core::{channel, Flow, DEFAULT_CAPACITY};

/// Builds a running-reduction flow.
///
/// The initial accumulator is the first element received; subsequent
/// elements are folded in via `f`, emitting the updated accumulator each
/// time. An empty stream emits nothing.
pub fn reduce<A, F>(f: F, capacity: usize) -> Flow<A, A>
where
    A: Clone + Send + 'static,
    F: Fn(A, A) -> A + Send + 'static,
{
    let (in_send, mut in_recv) = channel::<A>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<A>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut acc: Option<A> = None;
        while let Some(item) = in_recv.recv().await {
            let next = match acc.take() {
                Some(prev) => f(prev, item),
                None => item,
            };
            if out_send.send(next.clone()).await.is_err() {
                return;
            }
            acc = Some(next);
        }
    });

    Flow::from_parts(in_send, out_recv)
}
