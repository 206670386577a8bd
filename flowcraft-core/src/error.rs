// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the flowcraft dataflow runtime.
//!
//! Errors are local to the failing stage (see §7 of the design notes): a
//! [`FlowError::UserFunctionError`] closes that stage's outbound channel and is
//! never routed through the data channels themselves. Construction errors are
//! the only kind reported back to the caller directly, since they happen
//! before any stage task is spawned.

/// Root error type for all flowcraft operations.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Invalid parameters supplied when building a stage (e.g. `parallelism == 0`).
    ///
    /// Surfaced at construction time; no stage task is spawned.
    #[error("invalid stage configuration: {context}")]
    ConstructionError {
        /// What was wrong with the configuration.
        context: String,
    },

    /// A user-supplied transform aborted (panicked) while processing an element.
    ///
    /// The stage that hosted the panicking closure has already closed its
    /// outbound channel by the time this is observed; there is no per-element
    /// error channel in the core.
    #[error("user function aborted: {context}")]
    UserFunctionError {
        /// Context describing which operator/stage failed.
        context: String,
    },

    /// A plugged-in external source or sink reported a failure.
    ///
    /// The core only ever observes the resulting channel close; the adapter
    /// is responsible for surfacing the underlying cause through its own
    /// diagnostics.
    #[error("external adapter error: {context}")]
    ExternalAdapterError {
        /// Context supplied by the adapter.
        context: String,
    },
}

impl FlowError {
    /// Builds a [`FlowError::ConstructionError`] with the given context.
    pub fn construction(context: impl Into<String>) -> Self {
        Self::ConstructionError {
            context: context.into(),
        }
    }

    /// Builds a [`FlowError::UserFunctionError`] with the given context.
    pub fn user_function(context: impl Into<String>) -> Self {
        Self::UserFunctionError {
            context: context.into(),
        }
    }

    /// Builds a [`FlowError::ExternalAdapterError`] with the given context.
    pub fn external_adapter(context: impl Into<String>) -> Self {
        Self::ExternalAdapterError {
            context: context.into(),
        }
    }
}

/// Specialized `Result` alias for fallible flowcraft construction calls.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Validates a construction precondition, returning a [`FlowError::ConstructionError`]
/// if it does not hold.
pub fn require(condition: bool, context: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(FlowError::construction(context))
    }
}
