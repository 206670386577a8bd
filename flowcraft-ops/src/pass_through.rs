// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `PassThrough`: identity flow, useful as a wiring fixture (§4.C).

use flowcraft_core::{channel, Flow, DEFAULT_CAPACITY};

/// Builds an identity flow: every input is emitted unchanged, in order.
pub fn pass_through<I: Send + 'static>(capacity: usize) -> Flow<I, I> {
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            if out_send.send(item).await.is_err() {
                break;
            }
        }
    });

    Flow::from_parts(in_send, out_recv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_flow_preserves_sequence() {
        let flow = pass_through::<i32>(1);
        let (tx, rx) = flow.into_parts();
        for i in [1, 2, 3] {
            tx.send(i).await.unwrap();
        }
        drop(tx);

        let out = flowcraft_test_utils::drain(rx).await;
        assert_eq!(out, vec![1, 2, 3]);
    }
}
