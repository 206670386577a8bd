// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `FanOut(n)`: one input, `n` outputs; every output receives every element
//! (§4.E). Branches are backpressure-safe: a slow consumer on one branch
//! blocks the others rather than having elements silently dropped for it
//! (see the Open Questions in the design notes).

use flowcraft_core::{channel, require, Result, Source, DEFAULT_CAPACITY};

/// Duplicates every element of `source` onto `n` independent branches.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `n` is 0.
pub fn fan_out<O>(source: Source<O>, n: usize, capacity: usize) -> Result<Vec<Source<O>>>
where
    O: Clone + Send + 'static,
{
    require(n >= 1, "FanOut: branch count must be at least 1")?;

    let mut senders = Vec::with_capacity(n);
    let mut receivers = Vec::with_capacity(n);
    for _ in 0..n {
        let (tx, rx) = channel::<O>(capacity.max(DEFAULT_CAPACITY));
        senders.push(tx);
        receivers.push(rx);
    }

    tokio::spawn(async move {
        let mut upstream = source.out();
        while let Some(item) = upstream.recv().await {
            let mut any_alive = false;
            for tx in &senders {
                if tx.send(item.clone()).await.is_ok() {
                    any_alive = true;
                }
            }
            if !any_alive {
                break;
            }
        }
    });

    Ok(receivers.into_iter().map(Source::from_receiver).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_core::source_from_iter;

    #[tokio::test]
    async fn duplicates_every_element_to_every_branch() {
        let source = source_from_iter(vec!["a", "b", "c"], 1);
        let branches = fan_out(source, 3, 1).unwrap();

        // All branches must drain concurrently: FanOut blocks on the
        // slowest consumer, so reading them one at a time would deadlock.
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

        for items in &collected {
            assert_eq!(items, &vec!["a", "b", "c"]);
        }
    }

    #[tokio::test]
    async fn rejects_zero_branches() {
        let source = source_from_iter(Vec::<i32>::new(), 1);
        assert!(fan_out(source, 0, 1).is_err());
    }
}
