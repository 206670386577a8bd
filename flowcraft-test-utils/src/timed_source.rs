// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A [`Source`] fixture that emits a fixed sequence of elements separated by
//! the given inter-arrival delays, for exercising windowing operators (§4.F
//! of the design notes) the way the literal scenarios S3/S6 describe: "...
//! with 15 ms gaps."

use std::time::Duration;

use flowcraft_core::{channel, Source, DEFAULT_CAPACITY};

/// Builds a source that emits `(item, delay)` pairs, sleeping `delay` before
/// sending each `item`, then closes once every pair has been sent.
pub fn source_from_timed_iter<I>(items: Vec<(I, Duration)>, capacity: usize) -> Source<I>
where
    I: Send + 'static,
{
    let (tx, rx) = channel(capacity.max(DEFAULT_CAPACITY));
    tokio::spawn(async move {
        for (item, delay) in items {
            tokio::time::sleep(delay).await;
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });
    Source::from_receiver(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_items_after_their_delay_in_order() {
        let source = source_from_timed_iter(
            vec![
                ("a", Duration::ZERO),
                ("b", Duration::from_millis(10)),
                ("c", Duration::from_millis(10)),
            ],
            4,
        );
        let mut rx = source.out();
        let mut out = Vec::new();
        while let Some(v) = rx.recv().await {
            out.push(v);
        }
        assert_eq!(out, vec!["a", "b", "c"]);
    }
}
