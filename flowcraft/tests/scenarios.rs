// Copyright 2025 The Flowcraft Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The six literal end-to-end scenarios from the design notes (§8, "S1"
//! through "S6"), exercised through the public facade.

use std::time::Duration;

use flowcraft::prelude::*;
use flowcraft_test_utils::source_from_timed_iter;

#[tokio::test]
async fn s1_upper_case_map() -> anyhow::Result<()> {
    let source = source_from_iter(vec!["a", "b", "c"], 1);
    let upper = map(|s: &'static str| s.to_uppercase(), 1, 1)?;
    let (sink, collected) = collect::<String>(1);

    source.via(upper).to(sink).await;
    assert_eq!(collected.wait().await, vec!["A", "B", "C"]);
    Ok(())
}

#[tokio::test]
async fn s2_filter_even() -> anyhow::Result<()> {
    let source = source_from_iter(vec![1, 2, 3, 4, 5], 1);
    let evens = filter(|x: &i32| x % 2 == 0, 1, 1)?;
    let (sink, collected) = collect::<i32>(1);

    source.via(evens).to(sink).await;
    assert_eq!(collected.wait().await, vec![2, 4]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn s3_tumbling_window() -> anyhow::Result<()> {
    let source = source_from_timed_iter(
        vec![
            ("a", Duration::from_millis(15)),
            ("b", Duration::from_millis(15)),
            ("c", Duration::from_millis(15)),
            ("d", Duration::from_millis(15)),
            ("e", Duration::from_millis(15)),
            ("f", Duration::from_millis(15)),
            ("g", Duration::from_millis(15)),
        ],
        8,
    );
    let windows = tumbling::<&'static str>(Duration::from_millis(50), 8)?;
    let (sink, collected) = collect::<Vec<&'static str>>(8);

    source.via(windows).to(sink).await;
    assert_eq!(
        collected.wait().await,
        vec![vec!["a", "b", "c"], vec!["d", "e", "f"], vec!["g"]]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn s4_parallel_order_preservation() -> anyhow::Result<()> {
    // Deterministic stand-in for "sleep(random 0-10ms)": varies per-item
    // latency across workers without pulling in a random-number dependency,
    // which still exercises the reorder buffer under uneven completion
    // times (§4.D).
    let doubler = map(
        |x: u32| {
            std::thread::sleep(Duration::from_micros(u64::from((x * 37) % 11) * 100));
            x * 2
        },
        8,
        4,
    )?;
    let source = source_from_iter(1..=100u32, 4);
    let (sink, collected) = collect::<u32>(4);

    source.via(doubler).to(sink).await;
    let expected: Vec<u32> = (1..=100).map(|x| x * 2).collect();
    assert_eq!(collected.wait().await, expected);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn s5_throttle_backpressure() -> anyhow::Result<()> {
    let source = source_from_iter(1..=10i32, 10);
    let limiter = throttle::<i32>(2, Duration::from_millis(100), 10, ThrottleMode::Backpressure)?;
    let (sink, collected) = collect::<i32>(10);

    let start = tokio::time::Instant::now();
    source.via(limiter).to(sink).await;
    let elapsed = start.elapsed();

    assert_eq!(collected.wait().await, (1..=10).collect::<Vec<_>>());
    assert!(elapsed >= Duration::from_millis(400), "elapsed was {elapsed:?}");
    Ok(())
}

#[tokio::test]
async fn s6_session_window() -> anyhow::Result<()> {
    use std::sync::Arc;

    let source = source_from_iter(
        vec![("a", 0i64), ("b", 10), ("c", 200), ("d", 210)],
        4,
    );
    let extractor: TimestampExtractor<(&'static str, i64)> = Arc::new(|(_, t)| *t);
    let sessions = session::<(&'static str, i64)>(100, extractor, 4)?;
    let (sink, collected) = collect::<Vec<(&'static str, i64)>>(4);

    source.via(sessions).to(sink).await;
    assert_eq!(
        collected.wait().await,
        vec![
            vec![("a", 0), ("b", 10)],
            vec![("c", 200), ("d", 210)],
        ]
    );
    Ok(())
}
