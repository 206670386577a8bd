// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Sliding(size d, slide s)`, processing-time variant: every `s`, emits the
//! elements received within the last `d` (§4.F).

use std::time::Duration;

use flowcraft_core::{channel, require, Flow, Result, DEFAULT_CAPACITY};
use tokio::time::{interval_at, Instant};

/// Builds a processing-time sliding-window flow.
///
/// If `slide < size`, elements appear in multiple windows; if `slide >
/// size`, some elements appear in none. On upstream close, one final window
/// of still-live elements is emitted if non-empty.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `size` or
/// `slide` is zero.
pub fn sliding_processing_time<I>(
    size: Duration,
    slide: Duration,
    capacity: usize,
) -> Result<Flow<I, Vec<I>>>
where
    I: Clone + Send + 'static,
{
    require(!size.is_zero(), "Sliding: size must be non-zero")?;
    require(!slide.is_zero(), "Sliding: slide must be non-zero")?;

    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<Vec<I>>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + slide, slide);
        let mut buffer: Vec<(Instant, I)> = Vec::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    buffer.retain(|(t, _)| now.duration_since(*t) < size);
                    if !buffer.is_empty() {
                        let batch: Vec<I> = buffer.iter().map(|(_, v)| v.clone()).collect();
                        if out_send.send(batch).await.is_err() {
                            return;
                        }
                    }
                }
                item = in_recv.recv() => {
                    match item {
                        Some(x) => buffer.push((Instant::now(), x)),
                        None => {
                            let now = Instant::now();
                            buffer.retain(|(t, _)| now.duration_since(*t) < size);
                            if !buffer.is_empty() {
                                let batch: Vec<I> = buffer.into_iter().map(|(_, v)| v).collect();
                                let _ = out_send.send(batch).await;
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
