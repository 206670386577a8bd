// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Session(gap g, extractor)`: groups elements into sessions separated by
//! inactivity greater than `g`, merging sessions a late element bridges
//! (§4.F).

use flowcraft_core::{
    channel, require, EventTime, Flow, Result, Timed, TimestampExtractor, DEFAULT_CAPACITY,
};

struct OpenSession<I> {
    start: EventTime,
    end: EventTime,
    entries: Vec<Timed<I>>,
}

/// Builds a session-window flow.
///
/// An element joins an open session when its event-time falls within `gap`
/// of that session's range; if it falls within `gap` of more than one open
/// session, all of them merge into one. A session closes, and is emitted,
/// once the watermark (the maximum event-time seen so far) exceeds
/// `last_event_time_in_session + gap`, or when upstream closes.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `gap` is not
/// positive.
pub fn session<I>(gap: EventTime, extractor: TimestampExtractor<I>, capacity: usize) -> Result<Flow<I, Vec<I>>>
where
    I: Send + 'static,
{
    require(gap > 0, "Session: gap must be positive")?;

    let (in_send, mut in_recv) = channel::<I>(capacity.max(DEFAULT_CAPACITY));
    let (out_send, out_recv) = channel::<Vec<I>>(capacity.max(DEFAULT_CAPACITY));

    tokio::spawn(async move {
        let mut sessions: Vec<OpenSession<I>> = Vec::new();
        let mut watermark = EventTime::MIN;
        let mut seq: u64 = 0;

        while let Some(item) = in_recv.recv().await {
            seq += 1;
            let t = extractor(&item);
            if t > watermark {
                watermark = t;
            }

            let bridging: Vec<usize> = sessions
                .iter()
                .enumerate()
                .filter(|(_, s)| t >= s.start - gap && t <= s.end + gap)
                .map(|(idx, _)| idx)
                .collect();

            if bridging.is_empty() {
                sessions.push(OpenSession {
                    start: t,
                    end: t,
                    entries: vec![Timed::new(seq, t, item)],
                });
            } else {
                let mut start = t;
                let mut end = t;
                let mut entries = vec![Timed::new(seq, t, item)];
                for idx in bridging.into_iter().rev() {
                    let merged = sessions.remove(idx);
                    start = start.min(merged.start);
                    end = end.max(merged.end);
                    entries.extend(merged.entries);
                }
                sessions.push(OpenSession { start, end, entries });
            }

            let mut closing: Vec<OpenSession<I>> = Vec::new();
            sessions.retain_mut(|s| {
                if s.end + gap < watermark {
                    closing.push(std::mem::replace(
                        s,
                        OpenSession { start: 0, end: 0, entries: Vec::new() },
                    ));
                    false
                } else {
                    true
                }
            });
            closing.sort_by_key(|s| s.start);
            for mut s in closing {
                s.entries.sort_by_key(|e| (e.event_time, e.seq));
                let batch: Vec<I> = s.entries.into_iter().map(|e| e.value).collect();
                if !batch.is_empty() && out_send.send(batch).await.is_err() {
                    return;
                }
            }
        }

        // Upstream closed: emit every still-open session, ascending by start.
        sessions.sort_by_key(|s| s.start);
        for mut s in sessions {
            s.entries.sort_by_key(|e| (e.event_time, e.seq));
            let batch: Vec<I> = s.entries.into_iter().map(|e| e.value).collect();
            if !batch.is_empty() && out_send.send(batch).await.is_err() {
                return;
            }
        }
    });

    Ok(Flow::from_parts(in_send, out_recv))
}
