// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Helpers for consuming a channel to completion in tests.

use flowcraft_core::Receiver;

/// Drains `rx` until it closes, collecting every received element in order.
pub async fn drain<T: Send + 'static>(mut rx: Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Some(item) = rx.recv().await {
        items.push(item);
    }
    items
}

/// Asserts that `rx` produces no element within `timeout_ms`.
///
/// # Panics
///
/// Panics if an element (or a close) is observed before the timeout elapses.
pub async fn assert_no_element_emitted<T: Send + 'static>(rx: &mut Receiver<T>, timeout_ms: u64) {
    tokio::select! {
        biased;
        item = rx.recv() => {
            panic!("expected no element within {timeout_ms}ms, got one (closed: {})", item.is_none());
        }
        () = tokio::time::sleep(std::time::Duration::from_millis(timeout_ms)) => {}
    }
}
