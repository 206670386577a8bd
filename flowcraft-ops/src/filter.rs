// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Filter(pred, parallelism)`: emits `x` iff `pred(x)` (§4.C).

use flowcraft_core::{channel, require, Flow, Result, DEFAULT_CAPACITY};

/// Builds a `Filter` flow.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `parallelism` is 0.
pub fn filter<I, F>(pred: F, parallelism: usize, capacity: usize) -> Result<Flow<I, I>>
where
    I: Send + 'static,
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    require(parallelism >= 1, "Filter: parallelism must be at least 1")?;

    if parallelism == 1 {
        Ok(single_threaded(pred, capacity))
    } else {
        Ok(flowcraft_parallel::spawn_parallel(
            move |x| if pred(&x) { vec![x] } else { vec![] },
            parallelism,
            capacity,
        ))
    }
}

fn single_threaded<I, F>(pred: F, capacity: usize) -> Flow<I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            if pred(&item) && out_send.send(item).await.is_err() {
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
    async fn keeps_only_matching_elements() {
        // S2 — Filter even
        let flow = filter(|x: &i32| x % 2 == 0, 1, 1).unwrap();
        let (tx, rx) = flow.into_parts();
        for i in 1..=5 {
            tx.send(i).await.unwrap();
        }
        drop(tx);

        let out = flowcraft_test_utils::drain(rx).await;
        assert_eq!(out, vec![2, 4]);
    }
}
