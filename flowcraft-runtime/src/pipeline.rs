// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Pipeline`: bundles the one [`CancellationToken`] shared across every
//! stage of a graph run (§5, "Cancellation") with the bookkeeping to drive
//! that run to completion or early cancellation (§4.I, cases (1) and (2)).

use flowcraft_core::{CancellationToken, CompletionFuture};

/// One graph run's shared cancellation context.
///
/// Sources are wired to cancel promptly via [`Pipeline::token`] (§5); the
/// run itself is driven with [`Pipeline::run`], which resolves as soon as
/// either the sink completes normally or the token is cancelled.
pub struct Pipeline {
    token: CancellationToken,
}

impl Pipeline {
    /// Creates a new, not-yet-cancelled pipeline context.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Returns a clone of this pipeline's cancellation token, to be handed
    /// to a cancellable source or any stage built with
    /// [`flowcraft_core::do_stream_cancellable`].
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancels the pipeline. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives the run to its end: resolves once `completion` fires (the
    /// sink drained normally) or this pipeline is cancelled, whichever
    /// comes first.
    ///
    /// On cancellation, in-flight elements downstream of the cancelled
    /// sources may be dropped per §4.I case (2); the sink's own completion
    /// future is still safe to await afterwards; cancellation only means
    /// this call stops waiting for it.
    pub async fn run(&self, completion: CompletionFuture) {
        tokio::select! {
            biased;
            () = self.token.cancelled() => {}
            () = completion => {}
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::collect;
    use flowcraft_core::{new_completion, source_from_iter, Sink};

    #[tokio::test]
    async fn run_resolves_when_sink_completes_normally() {
        let pipeline = Pipeline::new();
        let source = source_from_iter(vec![1, 2, 3], 1);
        let (sink, handle) = collect::<i32>(1);
        let completion = source.to(sink);

        pipeline.run(completion).await;
        assert!(!pipeline.is_cancelled());
        assert_eq!(handle.wait().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn run_resolves_early_on_cancellation() {
        let pipeline = Pipeline::new();
        // A sink whose completion never fires: the paired sender is kept
        // alive (but never sent on) for the rest of this test.
        let (done_tx, completion) = new_completion();
        let (in_send, _in_recv) = flowcraft_core::channel::<i32>(1);
        let sink = Sink::from_parts(in_send, completion);

        pipeline.cancel();
        pipeline.run(sink.await_completion()).await;
        assert!(pipeline.is_cancelled());
        drop(done_tx);
    }
}
