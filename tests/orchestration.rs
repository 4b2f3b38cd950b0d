//! Orchestrator behaviour over whole item collections.

mod common;

use common::{remote, BatchProbe};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tinycc_client::batch::{partition, run_batched, BatchConfig, BatchOrchestrator};
use tinycc_client::types::{ApiError, BatchResponse};
use tinycc_client::Error;

fn orchestrator(batch_limit: usize, parallel_streams: usize) -> BatchOrchestrator {
    BatchOrchestrator::new(
        BatchConfig::new()
            .with_batch_limit(batch_limit)
            .with_parallel_streams(parallel_streams),
    )
    .unwrap()
}

fn numbers(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn as_numbers(items: &[Value]) -> Vec<u32> {
    items.iter().map(|v| v.as_u64().unwrap() as u32).collect()
}

#[tokio::test]
async fn test_single_round_of_three_batches() {
    let probe = BatchProbe::new();
    let items = numbers(75);
    let p = probe.clone();
    let resp = orchestrator(30, 4)
        .run(&items, move |batch| p.clone().echo(batch, |_| 5), Some("urls"))
        .await
        .unwrap();

    assert!(resp.is_success());
    assert_eq!(probe.calls(), 3);
    assert_eq!(probe.batch_sizes(), vec![30, 30, 15]);
    assert_eq!(as_numbers(resp.items()), items);
}

#[tokio::test]
async fn test_two_rounds_run_sequentially() {
    let probe = BatchProbe::new();
    let items = numbers(200);
    let p = probe.clone();
    let resp = orchestrator(30, 4)
        .run(&items, move |batch| p.clone().echo(batch, |_| 10), Some("urls"))
        .await
        .unwrap();

    assert_eq!(probe.calls(), 7);
    assert_eq!(probe.batch_sizes(), vec![30, 30, 30, 30, 30, 30, 20]);
    assert_eq!(as_numbers(resp.items()), items);
    assert!(probe.max_in_flight() <= 4);

    // every batch of round one finishes before any batch of round two starts
    let events = probe.events();
    let first_round_start = events.iter().position(|(s, f)| *s && *f >= 120).unwrap();
    let round_one_finished = events
        .iter()
        .filter(|(s, f)| !*s && *f < 120)
        .count();
    let finished_before = events[..first_round_start]
        .iter()
        .filter(|(s, f)| !*s && *f < 120)
        .count();
    assert_eq!(round_one_finished, 4);
    assert_eq!(finished_before, 4);
}

#[tokio::test]
async fn test_completion_order_does_not_affect_output_order() {
    let probe = BatchProbe::new();
    let items = numbers(50);
    let p = probe.clone();
    // later batches finish first
    let resp = orchestrator(5, 4)
        .run(
            &items,
            move |batch| p.clone().echo(batch, |first| 60 - u64::from(first)),
            Some("urls"),
        )
        .await
        .unwrap();
    assert_eq!(as_numbers(resp.items()), items);
}

#[tokio::test]
async fn test_concurrency_and_batch_size_bounds() {
    for (n, b, p) in [(1u32, 30usize, 4usize), (31, 30, 4), (97, 7, 3), (64, 8, 8), (10, 1, 2)] {
        let probe = BatchProbe::new();
        let items = numbers(n);
        let pr = probe.clone();
        let resp = orchestrator(b, p)
            .run(
                &items,
                move |batch| pr.clone().echo(batch, |first| u64::from(first % 3) * 3),
                Some("urls"),
            )
            .await
            .unwrap();

        let batches = (n as usize + b - 1) / b;
        assert_eq!(probe.calls(), batches, "n={n} b={b} p={p}");
        assert!(probe.batch_sizes().iter().all(|s| *s <= b));
        assert!(probe.max_in_flight() <= p);
        assert_eq!(partition::plan_rounds(n as usize, b, p).len(), (batches + p - 1) / p);
        assert_eq!(as_numbers(resp.items()), items);
    }
}

#[tokio::test]
async fn test_failed_batch_fails_whole_call() {
    let items = numbers(75);
    let resp = orchestrator(30, 4)
        .run(
            &items,
            |batch: Vec<u32>| async move {
                if batch[0] == 30 {
                    Err(remote(5, "rate limited"))
                } else {
                    Ok(BatchResponse {
                        version: "3.1".into(),
                        ..Default::default()
                    }
                    .with_collection("urls", batch.into_iter().map(|i| json!(i)).collect()))
                }
            },
            Some("urls"),
        )
        .await
        .unwrap();

    assert!(!resp.is_success());
    assert_eq!(resp.error.code, 5);
    assert_eq!(resp.error.message, "rate limited");
    let body = resp.to_value().unwrap();
    assert!(body.get("urls").is_none());
    assert_eq!(body["error"]["code"], 5);
    assert!(body["meta"]["request_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_failure_stops_later_rounds() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let items = numbers(20);
    let resp = orchestrator(2, 2)
        .run(
            &items,
            move |batch: Vec<u32>| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if batch[0] == 4 {
                        Err(remote(9, "bad hash"))
                    } else {
                        Ok(BatchResponse {
                            version: "3.1".into(),
                            ..Default::default()
                        })
                    }
                }
            },
            Some("urls"),
        )
        .await
        .unwrap();

    assert_eq!(resp.error.code, 9);
    // rounds one and two only
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_version_mismatch_short_circuits() {
    let items = numbers(90);
    let resp = orchestrator(30, 4)
        .run(
            &items,
            |batch: Vec<u32>| async move {
                let version = if batch[0] == 60 { "3.0" } else { "3.1" };
                Ok::<_, Error>(
                    BatchResponse {
                        version: version.into(),
                        ..Default::default()
                    }
                    .with_collection("urls", vec![json!(batch[0])]),
                )
            },
            Some("urls"),
        )
        .await
        .unwrap();

    assert!(!resp.is_success());
    assert!(resp.items.is_none());
    assert_eq!(
        resp.error.message,
        "Version of client (3.1) doesn't match version of API (3.0)"
    );
}

#[tokio::test]
async fn test_empty_remote_error_still_fails_call() {
    let resp = run_batched(
        &numbers(5),
        |_batch: Vec<u32>| async move {
            Err::<BatchResponse, _>(Error::Remote(ApiError::empty()))
        },
        Some("urls"),
        &BatchConfig::new(),
    )
    .await
    .unwrap();

    assert!(!resp.is_success());
    assert!(resp.items.is_none());
    assert!(!resp.error.is_empty());
    assert_eq!(resp.error.code, -1);
}

#[tokio::test]
async fn test_zero_limits_rejected_before_any_call() {
    for config in [
        BatchConfig::new().with_batch_limit(0),
        BatchConfig::new().with_parallel_streams(0),
    ] {
        let probe = BatchProbe::new();
        let p = probe.clone();
        let result = run_batched(
            &numbers(10),
            move |batch| p.clone().echo(batch, |_| 0),
            Some("urls"),
            &config,
        )
        .await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
        assert_eq!(probe.calls(), 0);
    }
}

#[tokio::test]
async fn test_concurrent_runs_share_nothing() {
    let orch = orchestrator(3, 2);
    let a = numbers(10);
    let b: Vec<u32> = (100..117).collect();
    let pa = BatchProbe::new();
    let pb = BatchProbe::new();
    let (pa2, pb2) = (pa.clone(), pb.clone());

    let (ra, rb) = tokio::join!(
        orch.run(&a, move |batch| pa2.clone().echo(batch, |_| 3), Some("urls")),
        orch.run(&b, move |batch| pb2.clone().echo(batch, |_| 2), Some("urls")),
    );

    assert_eq!(as_numbers(ra.unwrap().items()), a);
    assert_eq!(as_numbers(rb.unwrap().items()), b);
    assert!(pa.max_in_flight() <= 2);
    assert!(pb.max_in_flight() <= 2);
}
