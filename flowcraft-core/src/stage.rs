// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stage contracts (§4.A): `Source`, `Flow` and `Sink`, plus the `DoStream`
//! wiring primitive that connects two independently created stages.
//!
//! Every stage owns exactly one outbound channel and is its unique closer
//! (§3, "Ownership"). `Source` exposes only an outbound end; `Flow` exposes
//! both an inbound and an outbound end and is, simultaneously, a sink for its
//! upstream and a source for its downstream; `Sink` exposes only an inbound
//! end plus a completion signal.

use crate::channel::{channel, Receiver, Sender, DEFAULT_CAPACITY};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A future that resolves exactly once, when a sink has drained its inbound
/// channel and processed its last element (§4.A, §4.I).
///
/// Cloneable so both the constructing code and downstream wiring can await
/// the same completion independently.
pub type CompletionFuture = Shared<BoxFuture<'static, ()>>;

fn completion_pair() -> (oneshot::Sender<()>, CompletionFuture) {
    let (tx, rx) = oneshot::channel();
    let fut: BoxFuture<'static, ()> = Box::pin(async move {
        let _ = rx.await;
    });
    (tx, fut.shared())
}

/// A stage that produces elements. Invariant: a source closes its outbound
/// channel exactly once, on termination; after close, no more elements are
/// produced (§3).
pub struct Source<O> {
    out: Receiver<O>,
}

impl<O: Send + 'static> Source<O> {
    /// Wraps an already-constructed outbound channel as a `Source`.
    ///
    /// This is the entry point external adapters use to plug a socket, a
    /// broker consumer, or any other producer into the graph (§6): build the
    /// channel yourself, feed it from your own task, and hand the receiving
    /// half here.
    pub fn from_receiver(out: Receiver<O>) -> Self {
        Self { out }
    }

    /// Exposes the outbound channel, consuming the source.
    pub fn out(self) -> Receiver<O> {
        self.out
    }

    /// Wires this source into `flow` via [`do_stream`], returning a new
    /// `Source` that produces the flow's output. This is §4.A's
    /// "Source -> Flow" wiring case.
    pub fn via<O2>(self, flow: Flow<O, O2>) -> Source<O2>
    where
        O2: Send + 'static,
    {
        let (in_send, out_recv) = flow.into_parts();
        do_stream(self.out, in_send);
        Source { out: out_recv }
    }

    /// Wires this source into `sink` via [`do_stream`], returning the sink's
    /// completion future (§4.A's "Source -> Sink" wiring case).
    pub fn to(self, sink: Sink<O>) -> CompletionFuture {
        let (in_send, completion) = sink.into_parts();
        do_stream(self.out, in_send);
        completion
    }
}

/// A stage with one inbound and one outbound channel. Invariant: when its
/// inbound channel is closed and all pending work is drained, the flow
/// closes its outbound channel (§3).
pub struct Flow<I, O> {
    in_send: Sender<I>,
    out_recv: Receiver<O>,
}

impl<I: Send + 'static, O: Send + 'static> Flow<I, O> {
    /// Builds a `Flow` from its two independently owned channel halves.
    ///
    /// Used by operator constructors (`Map`, windowing, etc.): they create
    /// their own inbound/outbound channel pair, spawn the task that drives
    /// the transform between them, and hand the public halves back here.
    pub fn from_parts(in_send: Sender<I>, out_recv: Receiver<O>) -> Self {
        Self { in_send, out_recv }
    }

    /// Returns a sender that feeds this flow's inbound channel.
    ///
    /// Cloneable like any [`Sender`], so multiple producers may feed a single
    /// flow if a pipeline calls for it.
    pub fn in_(&self) -> Sender<I> {
        self.in_send.clone()
    }

    /// Decomposes this flow into its raw inbound sender and outbound
    /// receiver. Used internally by the wiring operators, and available to
    /// external adapters that need direct channel access (§6).
    pub fn into_parts(self) -> (Sender<I>, Receiver<O>) {
        (self.in_send, self.out_recv)
    }

    /// Wires this flow's output into `next`'s input via [`do_stream`],
    /// returning a combined `Flow` whose inbound channel is still this
    /// flow's original one (§4.A's "Flow -> Flow" wiring case).
    pub fn connect_to<O2>(self, next: Flow<O, O2>) -> Flow<I, O2>
    where
        O2: Send + 'static,
    {
        let (next_in, next_out) = next.into_parts();
        do_stream(self.out_recv, next_in);
        Flow {
            in_send: self.in_send,
            out_recv: next_out,
        }
    }

    /// Wires this flow's output into `sink` via [`do_stream`], returning the
    /// sink's completion future together with a sender that feeds this
    /// flow's original inbound channel.
    pub fn deliver_to(self, sink: Sink<O>) -> (Sender<I>, CompletionFuture) {
        let (sink_in, completion) = sink.into_parts();
        do_stream(self.out_recv, sink_in);
        (self.in_send, completion)
    }
}

/// A stage that consumes elements and signals completion exactly once, after
/// its inbound channel is closed and its last element has been processed
/// (§3, §4.I).
pub struct Sink<I> {
    in_send: Sender<I>,
    completion: CompletionFuture,
}

impl<I> Sink<I> {
    /// Builds a `Sink` from an inbound sender and the completion signal fired
    /// by the task draining the matching receiver.
    ///
    /// Used by sink constructors (`collect`, external adapters per §6):
    /// create the channel, spawn the consuming task, fire the paired
    /// [`oneshot::Sender`] exactly once when that task's receiver returns
    /// `None`, and hand the public sender + completion future back here.
    pub fn from_parts(in_send: Sender<I>, completion: CompletionFuture) -> Self {
        Self { in_send, completion }
    }

    /// Returns a sender that feeds this sink's inbound channel.
    pub fn in_(&self) -> Sender<I> {
        self.in_send.clone()
    }

    /// Blocks (asynchronously) until this sink signals completion.
    pub fn await_completion(&self) -> CompletionFuture {
        self.completion.clone()
    }

    /// Decomposes this sink into its raw inbound sender and completion
    /// future. Used internally by the wiring operators.
    pub fn into_parts(self) -> (Sender<I>, CompletionFuture) {
        (self.in_send, self.completion)
    }
}

/// Creates the paired sender/completion-future a [`Sink`] needs, and the
/// one-shot it must fire, exactly once, after its receiver drains.
pub fn new_completion() -> (oneshot::Sender<()>, CompletionFuture) {
    completion_pair()
}

/// The wiring primitive of §4.A: launches a concurrent task that forwards
/// every element from `upstream` to `downstream`, then drops `downstream`
/// (closing it) once `upstream` closes and has been fully drained.
///
/// This is the single place where channel-close propagation between two
/// independently created stages is enforced.
pub fn do_stream<T: Send + 'static>(
    mut upstream: Receiver<T>,
    downstream: Sender<T>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(item) = upstream.recv().await {
            if downstream.send(item).await.is_err() {
                // Downstream already gone; nothing left to forward to.
                break;
            }
        }
        // Dropping `downstream` here closes it, propagating the close to
        // whatever stage owns the matching receiver.
    })
}

/// Like [`do_stream`], but also terminates early (dropping in-flight
/// elements) when `cancel` fires, per §4.I case (2).
pub fn do_stream_cancellable<T: Send + 'static>(
    mut upstream: Receiver<T>,
    downstream: Sender<T>,
    cancel: crate::CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                item = upstream.recv() => {
                    match item {
                        Some(item) => {
                            if downstream.send(item).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }
    })
}

/// Convenience constructor for a [`Source`] that emits the elements of a
/// finite, already-materialized sequence and then closes.
///
/// Mainly useful for tests and examples; real sources wrap an external
/// producer via [`Source::from_receiver`].
pub fn source_from_iter<I, O>(items: I, capacity: usize) -> Source<O>
where
    I: IntoIterator<Item = O> + Send + 'static,
    I::IntoIter: Send,
    O: Send + 'static,
{
    let (tx, rx) = channel(capacity.max(DEFAULT_CAPACITY));
    tokio::spawn(async move {
        for item in items {
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });
    Source { out: rx }
}
