// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `RoundRobin(n)`: one input, `n` outputs; element `i` goes to output
//! `i mod n` (§4.E).

use flowcraft_core::{channel, require, Result, Source, DEFAULT_CAPACITY};

/// Distributes elements of `source` round-robin across `n` branches.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `n` is 0.
pub fn round_robin<O>(source: Source<O>, n: usize, capacity: usize) -> Result<Vec<Source<O>>>
where
    O: Send + 'static,
{
    require(n >= 1, "RoundRobin: branch count must be at least 1")?;

    let mut senders = Vec::with_capacity(n);
    let mut receivers = Vec::with_capacity(n);
    for _ in 0..n {
        let (tx, rx) = channel::<O>(capacity.max(DEFAULT_CAPACITY));
        senders.push(tx);
        receivers.push(rx);
    }

    tokio::spawn(async move {
        let mut upstream = source.out();
        let mut i = 0usize;
        while let Some(item) = upstream.recv().await {
            if senders[i % n].send(item).await.is_err() {
                break;
            }
            i += 1;
        }
    });

    Ok(receivers.into_iter().map(Source::from_receiver).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_core::source_from_iter;

    #[tokio::test]
    async fn distributes_by_index_modulo_branch_count() {
        let source = source_from_iter(1..=6, 1);
        let branches = round_robin(source, 3, 1).unwrap();

        let drains = branches.into_iter().map(|branch| {
            tokio::spawn(async move {
                let mut rx = branch.out();
                let mut items = Vec::new();
                while let Some(v) = rx.recv().await {
                    items.push(v);
                }
                items
            })
        });
        let mut collected = Vec::new();
        for handle in drains {
            collected.push(handle.await.unwrap());
        }

        assert_eq!(collected[0], vec![1, 4]);
        assert_eq!(collected[1], vec![2, 5]);
        assert_eq!(collected[2], vec![3, 6]);
    }
}
