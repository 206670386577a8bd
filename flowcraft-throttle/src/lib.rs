// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Throttler(rate N, period d, buffer B, mode)`: accepts at most `N`
//! elements per window of length `d`; `Discard` drops the excess, while
//! `Backpressure` holds the element and blocks the upstream until the next
//! period (§4.H).

use std::time::Duration;

use flowcraft_core::{channel, require, Flow, Result};
use tokio::time::{interval_at, Instant};

/// Behavior applied to elements that arrive after the period's budget is
/// exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleMode {
    /// Silently drop elements in excess of `rate`.
    Discard,
    /// Hold the element, blocking the upstream (via channel fullness) until
    /// the next period resets the budget.
    Backpressure,
}

/// Builds a throttling flow. The inbound channel's capacity is `buffer`,
/// which smooths brief bursts before backpressure (in either mode) reaches
/// the upstream.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `rate` or
/// `buffer` is zero, or `period` is zero.
pub fn throttle<I>(
    rate: u64,
    period: Duration,
    buffer: usize,
    mode: ThrottleMode,
) -> Result<Flow<I, I>>
where
    I: Send + 'static,
{
    require(rate >= 1, "Throttler: rate must be at least 1")?;
    require(!period.is_zero(), "Throttler: period must be non-zero")?;
    require(buffer >= 1, "Throttler: buffer must be at least 1")?;

    let (in_send, mut in_recv) = channel::<I>(buffer);
    let (out_send, out_recv) = channel::<I>(buffer);

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        let mut count: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = ticker.tick() => {
                    count = 0;
                }
                item = in_recv.recv() => {
                    let Some(item) = item else { return };
                    if count < rate {
                        count += 1;
                        if out_send.send(item).await.is_err() {
                            return;
                        }
                        continue;
                    }
                    match mode {
                        ThrottleMode::Discard => {
                            // Over budget for this period: drop silently.
                        }
                        ThrottleMode::Backpressure => {
                            // Not reading the next element until this one is
                            // admitted is what applies backpressure upstream.
                            ticker.tick().await;
                            count = 1;
                            if out_send.send(item).await.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    });

    Ok(Flow::from_parts(in_send, out_recv))
}
