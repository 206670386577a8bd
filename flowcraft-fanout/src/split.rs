// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Split(pred)`: one input, two outputs; an element goes to `left` if
//! `pred(x)`, else to `right` (§4.E).

use flowcraft_core::{channel, Source, DEFAULT_CAPACITY};

/// The two branches produced by [`split`].
pub struct Split<O> {
    pub left: Source<O>,
    pub right: Source<O>,
}

/// Splits `source` into two branches by predicate.
pub fn split<O, F>(source: Source<O>, pred: F, capacity: usize) -> Split<O>
where
    O: Send + 'static,
    F: Fn(&O) -> bool + Send + 'static,
{
    let (left_tx, left_rx) = channel::<O>(capacity.max(DEFAULT_CAPACITY));
    let (right_tx, right_rx) = channel::<O>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut upstream = source.out();
        while let Some(item) = upstream.recv().await {
            let sent = if pred(&item) {
                left_tx.send(item).await
            } else {
                right_tx.send(item).await
            };
            if sent.is_err() {
                break;
            }
        }
    });

    Split {
        left: Source::from_receiver(left_rx),
        right: Source::from_receiver(right_rx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_core::source_from_iter;

    #[tokio::test]
    async fn routes_by_predicate_preserving_relative_order() {
        let source = source_from_iter(1..=10, 1);
        let Split { left, right } = split(source, |x: &i32| x % 2 == 0, 1);

        let mut evens_rx = left.out();
        let mut odds_rx = right.out();

        let drain_evens = async {
            let mut evens = Vec::new();
            while let Some(v) = evens_rx.recv().await {
                evens.push(v);
            }
            evens
        };
        let drain_odds = async {
            let mut odds = Vec::new();
            while let Some(v) = odds_rx.recv().await {
                odds.push(v);
            }
            odds
        };
        let (evens, odds) = tokio::join!(drain_evens, drain_odds);

        assert_eq!(evens, vec![2, 4, 6, 8, 10]);
        assert_eq!(odds, vec![1, 3, 5, 7, 9]);
    }
}
