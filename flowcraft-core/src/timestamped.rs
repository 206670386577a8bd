// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `(I, t)` pair retained inside windowing operators until the watermark
//! passes the window's closing edge (§3, "Timed element").

/// Event-time in nanoseconds since an arbitrary but monotonic epoch.
///
/// Produced by a [`TimestampExtractor`]; absent extractors mean a stage runs
/// in processing-time instead, using wall-clock time on element receipt.
pub type EventTime = i64;

/// A function `I -> EventTime` yielding the event-time of an element.
///
/// If a windowing operator is built without one, it falls back to
/// processing-time (§3).
pub type TimestampExtractor<I> = std::sync::Arc<dyn Fn(&I) -> EventTime + Send + Sync>;

/// An element paired with its event-time and an arrival sequence number.
///
/// The sequence number breaks ties when two elements share an event-time:
/// within a window, output is sorted by event-time ascending, with ties
/// preserving arrival order (§4.F).
#[derive(Debug, Clone)]
pub struct Timed<I> {
    pub seq: u64,
    pub event_time: EventTime,
    pub value: I,
}

impl<I> Timed<I> {
    pub fn new(seq: u64, event_time: EventTime, value: I) -> Self {
        Self {
            seq,
            event_time,
            value,
        }
    }
}
