// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Map(f, parallelism)`: emits `f(x)` for each input `x` (§4.C).

use flowcraft_core::{channel, require, Flow, Result, DEFAULT_CAPACITY};

/// Builds a `Map` flow.
///
/// When `parallelism == 1`, output order is input order by construction
/// (single sequential task). When `parallelism > 1`, ordering is restored by
/// the [`flowcraft_parallel`] dispatcher/reorder engine (§4.D).
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `parallelism` is 0.
pub fn map<I, O, F>(f: F, parallelism: usize, capacity: usize) -> Result<Flow<I, O>>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Send + Sync + 'static,
{
    require(parallelism >= 1, "Map: parallelism must be at least 1")?;

    if parallelism == 1 {
        Ok(single_threaded(f, capacity))
    } else {
        Ok(flowcraft_parallel::spawn_parallel(
            move |x| vec![f(x)],
            parallelism,
            capacity,
        ))
    }
}

fn single_threaded<I, O, F>(f: F, capacity: usize) -> Flow<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Send + Sync + 'static,
{
    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<O>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        while let Some(item) = in_recv.recv().await {
            if out_send.send(f(item)).await.is_err() {
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
    async fn uppercases_in_order() {
        // S1 — Upper-case Map
        let flow = map(|s: String| s.to_uppercase(), 1, 1).unwrap();
        let (tx, rx) = flow.into_parts();
        for s in ["a", "b", "c"] {
            tx.send(s.to_string()).await.unwrap();
        }
        drop(tx);

        let out = flowcraft_test_utils::drain(rx).await;
        assert_eq!(out, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn rejects_zero_parallelism() {
        let err = map(|x: i32| x, 0, 1);
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn parallel_map_preserves_order() {
        // S4 — Parallel order preservation (deterministic stand-in for the
        // randomized-sleep variant: exercises the reorder buffer directly).
        let flow = map(|x: i32| x * 2, 8, 1).unwrap();
        let (tx, rx) = flow.into_parts();
        for i in 1..=100 {
            tx.send(i).await.unwrap();
        }
        drop(tx);

        let out = flowcraft_test_utils::drain(rx).await;
        let expected: Vec<i32> = (1..=100).map(|x| x * 2).collect();
        assert_eq!(out, expected);
    }
}
