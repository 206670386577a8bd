// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The bounded FIFO channel that is the sole synchronization primitive between
//! stages (§5). Every send and every receive is a suspension point; nothing
//! else in the runtime blocks.

use tokio::sync::mpsc;

/// The producing half of an inter-stage channel.
pub type Sender<T> = mpsc::Sender<T>;

/// The consuming half of an inter-stage channel. Deliberately not `Clone`:
/// each stage owns exactly one inbound channel, so only one task may ever
/// read from it.
pub type Receiver<T> = mpsc::Receiver<T>;

/// Default bounded capacity used when a wiring call does not specify one.
pub const DEFAULT_CAPACITY: usize = 1;

/// Creates a new bounded channel of the given capacity.
///
/// `capacity` must be at least 1; a capacity of 0 would make every send
/// rendezvous with a receive, which `tokio::sync::mpsc` does not support.
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    mpsc::channel(capacity.max(1))
}
