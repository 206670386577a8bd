// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Sliding(size d, slide s, extractor)`, event-time variant: windows are
//! keyed on event-time and closed by a watermark (§4.F).
//!
//! Unlike the processing-time variants, this operator never waits on a
//! wall-clock timer: the watermark only advances as elements arrive, so
//! `size`, `slide` and `allowed_lateness` are expressed in the same
//! [`EventTime`] unit as the timestamp extractor, not [`std::time::Duration`].

use std::collections::BTreeMap;

use flowcraft_core::{
    channel, require, EventTime, Flow, Result, Timed, TimestampExtractor, DEFAULT_CAPACITY,
};

/// Returns every window start `w` (a multiple of `slide`) such that
/// `w <= event_time < w + size` (§8, invariant 5).
fn assign_windows(event_time: EventTime, size: EventTime, slide: EventTime) -> Vec<EventTime> {
    let mut windows = Vec::new();
    let mut w = event_time.div_euclid(slide) * slide;
    while w > event_time - size {
        windows.push(w);
        w -= slide;
    }
    windows
}

/// Drains every window whose closing edge `w + size` has fallen behind the
/// watermark, emitting each non-empty one sorted by event-time ascending
/// (arrival order as tiebreak), in window-start order.
async fn close_ready_windows<I: Send + 'static>(
    windows: &mut BTreeMap<EventTime, Vec<Timed<I>>>,
    out_send: &flowcraft_core::Sender<Vec<I>>,
    watermark: EventTime,
    size: EventTime,
) -> bool {
    loop {
        let ready: Vec<EventTime> = windows
            .keys()
            .take_while(|&&w| w + size <= watermark)
            .cloned()
            .collect();
        if ready.is_empty() {
            return true;
        }
        for w in ready {
            if let Some(mut entries) = windows.remove(&w) {
                entries.sort_by_key(|e| (e.event_time, e.seq));
                let batch: Vec<I> = entries.into_iter().map(|e| e.value).collect();
                if !batch.is_empty() && out_send.send(batch).await.is_err() {
                    return false;
                }
            }
        }
    }
}

/// Builds an event-time sliding-window flow.
///
/// The watermark is `max(seen event-time) - allowed_lateness`; a window
/// `[w, w+size)` closes and is emitted once the watermark passes `w+size`.
/// Elements whose event-time is below the current watermark are dropped as
/// late. Within an emitted window, elements are sorted by event-time
/// ascending, with arrival order as the tiebreak.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `size` or
/// `slide` is not positive.
pub fn sliding_event_time<I>(
    size: EventTime,
    slide: EventTime,
    allowed_lateness: EventTime,
    extractor: TimestampExtractor<I>,
    capacity: usize,
) -> Result<Flow<I, Vec<I>>>
where
    I: Clone + Send + 'static,
{
    require(size > 0, "Sliding: size must be positive")?;
    require(slide > 0, "Sliding: slide must be positive")?;
    require(allowed_lateness >= 0, "Sliding: allowed_lateness must be non-negative")?;

    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<Vec<I>>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut windows: BTreeMap<EventTime, Vec<Timed<I>>> = BTreeMap::new();
        let mut watermark = EventTime::MIN;
        let mut max_seen = EventTime::MIN;
        let mut seq: u64 = 0;

        while let Some(item) = in_recv.recv().await {
            seq += 1;
            let t = extractor(&item);
            if t < watermark {
                continue; // late, dropped
            }
            if t > max_seen {
                max_seen = t;
                watermark = max_seen - allowed_lateness;
            }

            for w in assign_windows(t, size, slide) {
                windows.entry(w).or_default().push(Timed::new(seq, t, item.clone()));
            }

            if !close_ready_windows(&mut windows, &out_send, watermark, size).await {
                return;
            }
        }

        // Upstream closed: emit every remaining window, ascending by start.
        for (_, mut entries) in windows {
            entries.sort_by_key(|e| (e.event_time, e.seq));
            let batch: Vec<I> = entries.into_iter().map(|e| e.value).collect();
            if !batch.is_empty() && out_send.send(batch).await.is_err() {
                return;
            }
        }
    });

    Ok(Flow::from_parts(in_send, out_recv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn closes_windows_once_watermark_passes_and_sorts_by_event_time() {
        let extractor: TimestampExtractor<(i64, &'static str)> = Arc::new(|(t, _)| *t);
        let flow =
            sliding_event_time::<(i64, &'static str)>(100, 100, 20, extractor, 8).unwrap();
        let (tx, mut rx) = flow.into_parts();

        tx.send((10, "a")).await.unwrap();
        // Within the allowed lateness of the watermark raised by "a".
        tx.send((5, "b")).await.unwrap();
        // Advances the watermark past [0,100) so it closes.
        tx.send((150, "c")).await.unwrap();
        drop(tx);

        let first = rx.recv().await.unwrap();
        assert_eq!(first, vec![(5, "b"), (10, "a")]);

        let second = rx.recv().await.unwrap();
        assert_eq!(second, vec![(150, "c")]);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn drops_elements_older_than_the_watermark() {
        let extractor: TimestampExtractor<i64> = Arc::new(|t| *t);
        let flow = sliding_event_time::<i64>(50, 50, 0, extractor, 8).unwrap();
        let (tx, mut rx) = flow.into_parts();

        tx.send(200).await.unwrap(); // watermark -> 200
        tx.send(10).await.unwrap(); // late: 10 < 200, dropped
        drop(tx);

        let only = rx.recv().await.unwrap();
        assert_eq!(only, vec![200]);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn rejects_non_positive_size_or_slide() {
        let extractor: TimestampExtractor<i64> = Arc::new(|t| *t);
        assert!(sliding_event_time::<i64>(0, 10, 0, extractor.clone(), 1).is_err());
        assert!(sliding_event_time::<i64>(10, 0, 0, extractor, 1).is_err());
    }

    #[test]
    fn assigns_overlapping_window_starts() {
        // size=100, slide=50: t=120 belongs to windows [50,150) and [100,200).
        let mut windows = assign_windows(120, 100, 50);
        windows.sort_unstable();
        assert_eq!(windows, vec![50, 100]);
    }
}
