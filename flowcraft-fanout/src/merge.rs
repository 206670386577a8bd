// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Merge(k)`: `k` inputs, one output; elements are forwarded in arrival
//! order (non-deterministic across inputs), preserving relative order
//! within each input. Closes output only when all `k` inputs are closed
//! (§4.E).

use flowcraft_core::{channel, require, Result, Source, DEFAULT_CAPACITY};

/// Merges `k` sources into a single output.
///
/// Relies on `tokio::sync::mpsc`'s own semantics: the combined output sender
/// is cloned once per input-forwarding task, so the channel only closes once
/// every clone (i.e. every input) has drained and been dropped.
///
/// # Errors
///
/// Returns [`flowcraft_core::FlowError::ConstructionError`] if `sources` is empty.
pub fn merge<O>(sources: Vec<Source<O>>, capacity: usize) -> Result<Source<O>>
where
    O: Send + 'static,
{
    require(!sources.is_empty(), "Merge: at least one input is required")?;

    let (out_tx, out_rx) = channel::<O>(capacity.max(DEFAULT_CAPACITY));

    for source in sources {
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            let mut upstream = source.out();
            while let Some(item) = upstream.recv().await {
                if out_tx.send(item).await.is_err() {
                    break;
                }
            }
            // This input's clone of `out_tx` drops here; the merged output
            // only closes once every input's clone has dropped.
        });
    }
    drop(out_tx);

    Ok(Source::from_receiver(out_rx))
}
