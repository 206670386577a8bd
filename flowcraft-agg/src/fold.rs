// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Fold(init: B, f: (B,I)->B)`: emits the running fold on each input
//! (§4.G). Stateful, so always parallelism 1, as [`crate::reduce::reduce`].

use flowcraft_core::{channel, Flow, DEFAULT_CAPACITY};

/// Builds a running-fold flow. The first emitted value is `f(init, x_0)`.
pub fn fold<I, B, F>(init: B, f: F, capacity: usize) -> Flow<I, B>
where
    I: Send + 'static,
    B: Clone + Send + 'static,
    F: Fn(B, I) -> B + Send + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<B>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut acc = init;
        while let Some(item) = in_recv.recv().await {
            acc = f(acc, item);
            if out_send.send(acc.clone()).await.is_err() {
                return;
            }
        }
    });

    Flow::from_parts(in_send, out_recv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_running_fold_starting_from_init() {
        let flow = fold::<i32, String, _>(String::new(), |acc, x| format!("{acc}{x}"), 1);
        let (tx, mut rx) = flow.into_parts();
        for x in [1, 2, 3] {
            tx.send(x).await.unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        while let Some(v) = rx.recv().await {
            out.push(v);
        }
        assert_eq!(out, vec!["1", "12", "123"]);
    }

    #[tokio::test]
    async fn empty_stream_emits_nothing() {
        let flow = fold::<i32, i32, _>(0, |acc, x| acc + x, 1);
        let (tx, mut rx) = flow.into_parts();
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
