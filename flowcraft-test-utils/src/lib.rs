// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared test fixtures for the flowcraft workspace: draining helpers, a
//! timed-emission source fixture for exercising windowing operators, and a
//! `with_timeout!` guard against a hung test.

pub mod drain;
pub mod timed_source;

pub use drain::{assert_no_element_emitted, drain};
pub use timed_source::source_from_timed_iter;

/// Wraps a test body in a timeout so a deadlocked stage fails the test
/// instead of hanging the suite.
#[macro_export]
macro_rules! with_timeout {
    ($test_body:expr) => {
        tokio::time::timeout(std::time::Duration::from_secs(5), async { $test_body })
            .await
            .expect("test timed out after 5 seconds")
    };
}
