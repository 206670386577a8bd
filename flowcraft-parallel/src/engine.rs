// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Order-preserving parallel transform engine (§4.D).
//!
//! `P` concurrent workers compute `f(x_i)` but the downstream must observe
//! outputs in the order `x_i` arrived. A dispatcher tags each input with a
//! sequence number and round-robins it to a worker; workers post their
//! results, keyed by sequence number, into a shared reorder buffer; an
//! emitter drains the buffer strictly in sequence order.
//!
//! `f` returns a `Vec<O>` rather than a single `O` so this one engine backs
//! `Map` (always exactly one output), `FlatMap` (zero or more, in order) and
//! `Filter` (zero or one) uniformly.

use flowcraft_core::{channel, log_error, Flow, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct ReorderState<O> {
    ready: Mutex<BTreeMap<u64, Vec<O>>>,
    notify: Notify,
    /// Total number of items the dispatcher will ever send; only valid once
    /// `dispatch_done` is set.
    total: AtomicU64,
    dispatch_done: AtomicBool,
    /// Set when a worker input channel could not be fed (worker task died,
    /// most likely a panicking user function). Per §7, this is fatal to the
    /// whole stage: the emitter closes its outbound channel without waiting
    /// for the unreachable sequence number.
    fatal: AtomicBool,
}

impl<O> ReorderState<O> {
    fn new() -> Self {
        Self {
            ready: Mutex::new(BTreeMap::new()),
            notify: Notify::new(),
            total: AtomicU64::new(u64::MAX),
            dispatch_done: AtomicBool::new(false),
            fatal: AtomicBool::new(false),
        }
    }
}

/// Spawns the dispatcher/workers/emitter triad and returns a [`Flow`] whose
/// inbound channel feeds the dispatcher and whose outbound channel is fed by
/// the emitter, in strict input order.
pub fn spawn_parallel<I, O, F>(f: F, parallelism: usize, capacity: usize) -> Flow<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Vec<O> + Send + Sync + 'static,
{
    debug_assert!(parallelism >= 1, "parallelism must be at least 1");
    let f = Arc::new(f);

    let (in_send, in_recv) = channel::<I>(capacity.max(1));
    let (out_send, out_recv) = channel::<O>(capacity.max(1));

    // Per-worker bounded(1) input channels: "bounded capacity 1 per worker" (§4.D).
    let mut worker_senders = Vec::with_capacity(parallelism);
    let mut worker_receivers = Vec::with_capacity(parallelism);
    for _ in 0..parallelism {
        let (tx, rx) = channel::<(u64, I)>(1);
        worker_senders.push(tx);
        worker_receivers.push(rx);
    }

    let state: Arc<ReorderState<O>> = Arc::new(ReorderState::new());

    tokio::spawn(dispatcher_loop(in_recv, worker_senders, state.clone()));

    let worker_handles: Vec<_> = worker_receivers
        .into_iter()
        .map(|rx| tokio::spawn(worker_loop(rx, f.clone(), state.clone())))
        .collect();
    tokio::spawn(reap_workers(worker_handles, state.clone()));

    tokio::spawn(emitter_loop(out_send, state));

    Flow::from_parts(in_send, out_recv)
}

/// Awaits every worker's [`JoinHandle`] and treats a panic as fatal to the
/// stage (§7, `UserFunctionError`): the dispatcher only ever notices a dead
/// worker on its *next* send, which never happens if the panic occurs on one
/// of the last `parallelism` in-flight items, leaving the emitter waiting on
/// a sequence number that will never arrive. Watching the handles directly
/// closes that gap regardless of how many more items the dispatcher has left
/// to send.
async fn reap_workers<O>(handles: Vec<tokio::task::JoinHandle<()>>, state: Arc<ReorderState<O>>) {
    for handle in handles {
        if let Err(join_err) = handle.await {
            if join_err.is_panic() {
                log_error!("flowcraft-parallel: worker panicked, aborting stage: {join_err}");
                state.fatal.store(true, Ordering::Release);
                state.notify.notify_waiters();
            }
        }
    }
}

async fn dispatcher_loop<I, O>(
    mut in_recv: Receiver<I>,
    worker_senders: Vec<Sender<(u64, I)>>,
    state: Arc<ReorderState<O>>,
) {
    let parallelism = worker_senders.len();
    let mut seq: u64 = 0;
    let mut next_worker = 0usize;

    while let Some(item) = in_recv.recv().await {
        let worker = &worker_senders[next_worker % parallelism];
        if worker.send((seq, item)).await.is_err() {
            log_error!("flowcraft-parallel: worker {next_worker} unreachable, aborting stage");
            state.fatal.store(true, Ordering::Release);
            state.notify.notify_waiters();
            return;
        }
        seq += 1;
        next_worker = next_worker.wrapping_add(1);
    }

    state.total.store(seq, Ordering::Release);
    state.dispatch_done.store(true, Ordering::Release);
    state.notify.notify_waiters();
    // `worker_senders` drops here, closing every worker's inbound channel so
    // each worker loop below ends once it drains its remaining queue.
}

async fn worker_loop<I, O, F>(
    mut rx: Receiver<(u64, I)>,
    f: Arc<F>,
    state: Arc<ReorderState<O>>,
) where
    F: Fn(I) -> Vec<O> + Send + Sync + 'static,
    O: Send + 'static,
{
    while let Some((seq, item)) = rx.recv().await {
        let outputs = f(item);
        state.ready.lock().insert(seq, outputs);
        state.notify.notify_waiters();
    }
}

async fn emitter_loop<O: Send + 'static>(out_send: Sender<O>, state: Arc<ReorderState<O>>) {
    let mut next_expected: u64 = 0;

    loop {
        // Register for the next notification *before* draining/checking: a
        // worker's `notify_waiters()` (engine.rs's worker loop) stores no
        // permit, so a wakeup that lands between a "nothing ready yet" check
        // and the `.await` below would otherwise be lost and the emitter
        // would block forever. `enable()` marks this waiter as registered
        // immediately, so any notification from this point on is observed
        // even though we haven't polled the future yet.
        let notified = state.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        // Drain every entry that has become contiguous with `next_expected`.
        loop {
            let outputs = {
                let mut ready = state.ready.lock();
                ready.remove(&next_expected)
            };
            match outputs {
                Some(outputs) => {
                    for item in outputs {
                        if out_send.send(item).await.is_err() {
                            return;
                        }
                    }
                    next_expected += 1;
                }
                None => break,
            }
        }

        if state.fatal.load(Ordering::Acquire) {
            return;
        }

        if state.dispatch_done.load(Ordering::Acquire)
            && next_expected >= state.total.load(Ordering::Acquire)
        {
            return;
        }

        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_test_utils::drain;

    #[tokio::test]
    async fn preserves_input_order_under_parallelism() {
        let flow = spawn_parallel(|x: u32| vec![x * 2], 8, 4);
        let (tx, out) = flow.into_parts();
        for i in 1..=100u32 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        let result = drain(out).await;
        let expected: Vec<u32> = (1..=100).map(|x| x * 2).collect();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn filter_like_usage_drops_some_outputs_but_keeps_order() {
        let flow = spawn_parallel(
            |x: i32| if x % 2 == 0 { vec![x] } else { vec![] },
            4,
            2,
        );
        let (tx, out) = flow.into_parts();
        for i in 1..=10 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        let result = drain(out).await;
        assert_eq!(result, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn flat_map_like_usage_preserves_order_within_and_across_items() {
        let flow = spawn_parallel(|x: i32| vec![x, x], 4, 2);
        let (tx, out) = flow.into_parts();
        for i in 1..=5 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        let result = drain(out).await;
        assert_eq!(result, vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[tokio::test]
    async fn parallelism_greater_than_input_count_still_works() {
        let flow = spawn_parallel(|x: i32| vec![x + 1], 16, 1);
        let (tx, out) = flow.into_parts();
        for i in 1..=3 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        assert_eq!(drain(out).await, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let flow = spawn_parallel(|x: i32| vec![x], 4, 1);
        let (tx, out) = flow.into_parts();
        drop(tx);
        assert_eq!(drain(out).await, Vec::<i32>::new());
    }

    #[tokio::test]
    async fn panicking_worker_closes_output_instead_of_hanging() {
        // Regression test: a worker that panics on one of the last
        // `parallelism` in-flight items must still close the outbound
        // channel. The dispatcher has nothing left to send by the time the
        // panic happens, so it never observes a dead worker; only the
        // reaper catches it.
        let flow = spawn_parallel(
            |x: i32| {
                if x == 3 {
                    panic!("boom");
                }
                vec![x]
            },
            2,
            1,
        );
        let (tx, out) = flow.into_parts();
        for i in 1..=3 {
            tx.send(i).await.unwrap();
        }
        drop(tx);

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), drain(out))
            .await
            .expect("emitter hung instead of closing its outbound channel after a worker panic");
        assert!(result.len() < 3, "expected the panic to cut the stream short, got {result:?}");
    }
}
