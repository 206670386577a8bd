// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Flatten`: input of `Vec<T>`, output of `T`; elements are emitted in
//! sequence order (§4.E).

use flowcraft_core::{channel, Source, DEFAULT_CAPACITY};

/// Flattens a source of `Vec<T>` into a source of `T`.
pub fn flatten<T>(source: Source<Vec<T>>, capacity: usize) -> Source<T>
where
    T: Send + 'static,
{
    let (out_tx, out_rx) = channel::<T>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut upstream = source.out();
        while let Some(batch) = upstream.recv().await {
            for item in batch {
                if out_tx.send(item).await.is_err() {
                    return;
                }
            }
        }
    });

    Source::from_receiver(out_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_core::source_from_iter;

    #[tokio::test]
    async fn emits_inner_elements_in_sequence_order() {
        let source = source_from_iter(vec![vec![1, 2], vec![], vec![3]], 1);
        let flattened = flatten(source, 1);

        let mut out = Vec::new();
        let mut rx = flattened.out();
        while let Some(v) = rx.recv().await {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3]);
    }
}
