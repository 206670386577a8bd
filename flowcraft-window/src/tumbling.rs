// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Tumbling(d)`: non-overlapping fixed windows of length `d`, boundaries
//! aligned to the operator's start time (§4.F).

use std::time::Duration;

use flowcraft_core::{channel, require, Flow, Result, DEFAULT_CAPACITY};
use tokio::time::{interval_at, Instant};

/// Builds a tumbling-window flow: every `size`, the current buffer is
/// emitted and replaced with an empty one. On upstream close, a non-empty
/// partial buffer is emitted once more before the output closes.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `size` is zero.
pub fn tumbling<I>(size: Duration, capacity: usize) -> Result<Flow<I, Vec<I>>>
where
    I: Send + 'static,
{
    require(!size.is_zero(), "Tumbling: size must be non-zero")?;

    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<Vec<I>>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + size, size);
        let mut buffer: Vec<I> = Vec::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !buffer.is_empty() {
                        let batch = std::mem::take(&mut buffer);
                        if out_send.send(batch).await.is_err() {
                            return;
                        }
                    }
                }
                item = in_recv.recv() => {
                    match item {
                        Some(x) => buffer.push(x),
                        None => {
                            if !buffer.is_empty() {
                                let _ = out_send.send(buffer).await;
                            }
                            return;
                        }
                    }
                }
            }
        }
    });

    Ok(Flow::from_parts(in_send, out_recv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_non_overlapping_windows_and_final_partial() {
        // S3 — Tumbling window
        let flow = tumbling::<&'static str>(Duration::from_millis(50), 8).unwrap();
        let (tx, mut rx) = flow.into_parts();

        tokio::spawn(async move {
            for (label, delay_ms) in [
                ("a", 15),
                ("b", 15),
                ("c", 15),
                ("d", 15),
                ("e", 15),
                ("f", 15),
                ("g", 15),
            ] {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                tx.send(label).await.unwrap();
            }
        });

        let mut windows = Vec::new();
        while let Some(w) = rx.recv().await {
            windows.push(w);
        }
        assert_eq!(windows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"], vec!["g"]]);
    }

    #[tokio::test]
    async fn rejects_zero_size() {
        assert!(tumbling::<i32>(Duration::ZERO, 1).is_err());
    }

    #[tokio::test]
    async fn empty_source_emits_nothing() {
        let flow = tumbling::<i32>(Duration::from_millis(10), 1).unwrap();
        let (tx, mut rx) = flow.into_parts();
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
