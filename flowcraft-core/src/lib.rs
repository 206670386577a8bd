#![allow(clippy::module_name_repetitions)]

//! Stage contracts, channels, cancellation and the error hierarchy that every
//! other flowcraft crate builds on.
//!
//! See the crate-level design notes for the full picture; in short: a graph
//! is assembled from [`Source`], [`Flow`] and [`Sink`] stages connected by
//! bounded FIFO [`Receiver`]/[`Sender`] channels, wired together with
//! [`do_stream`], and torn down cooperatively through a shared
//! [`CancellationToken`].

#[macro_use]
pub mod logging;

pub mod cancellation;
pub mod channel;
pub mod error;
pub mod stage;
pub mod timestamped;

pub use cancellation::CancellationToken;
pub use channel::{channel, Receiver, Sender, DEFAULT_CAPACITY};
pub use error::{require, FlowError, Result};
pub use stage::{
    do_stream, do_stream_cancellable, new_completion, source_from_iter, CompletionFuture, Flow,
    Sink, Source,
};
pub use timestamped::{EventTime, Timed, TimestampExtractor};

/// Re-exports the handful of types a downstream operator crate needs; mirrors
/// the top-level `flowcraft::prelude`.
pub mod prelude {
    pub use crate::{
        channel, CancellationToken, CompletionFuture, EventTime, Flow, FlowError, Receiver,
        Result, Sender, Sink, Source, Timed, TimestampExtractor, DEFAULT_CAPACITY,
    };
}
