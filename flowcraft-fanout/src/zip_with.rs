// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `ZipWith(f)`: two inputs, one output; pairs the `i`-th element of each and
//! emits `f(a_i, b_i)`. Closes output when either input closes; the unmatched
//! tail of the longer input is discarded (§4.E, and the Open Questions in the
//! design notes — this spec chooses discard over buffering).

use flowcraft_core::{channel, Source, DEFAULT_CAPACITY};

/// Pairs elements of `a` and `b` positionally and combines them with `f`.
pub fn zip_with<A, B, C, F>(a: Source<A>, b: Source<B>, mut f: F, capacity: usize) -> Source<C>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    F: FnMut(A, B) -> C + Send + 'static,
{
    let (out_tx, out_rx) = channel::<C>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut a_rx = a.out();
        let mut b_rx = b.out();
        loop {
            let (next_a, next_b) = (a_rx.recv().await, b_rx.recv().await);
            match (next_a, next_b) {
                (Some(va), Some(vb)) => {
                    if out_tx.send(f(va, vb)).await.is_err() {
                        break;
                    }
                }
                _ => break, // either side closed: unmatched tail discarded
            }
        }
    });

    Source::from_receiver(out_rx)
}
