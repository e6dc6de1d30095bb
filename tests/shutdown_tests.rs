//! Integration tests for graceful shutdown of the accumulation worker.

#![cfg(feature = "async")]

use logward::infrastructure::mocks::{CaptureSink, FixedClock};
use logward::{Logward, Template};
use std::sync::Arc;
use std::time::Duration;

const EVERY_2: Template = Template::with_threshold("EVERY_2", "batch {}", 2);

fn runtime(sink: &CaptureSink) -> Logward {
    Logward::builder()
        .with_sink(Arc::new(sink.clone()))
        .with_clock(Arc::new(FixedClock::default()))
        .with_templates(&[EVERY_2])
        .with_queue_capacity(256)
        .with_shutdown_grace(Duration::from_secs(5))
        .build()
        .expect("valid config")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_drains_accumulated_emissions() {
    let sink = CaptureSink::new();
    let logward = runtime(&sink);
    let logger = logward.logger("import::batch");

    // 20 events at threshold 2 => 10 tripped emissions queued to the worker
    for i in 0..20 {
        logger.accumulate("EVERY_2", &[&i]);
    }

    logward.shutdown().await.expect("drain failed");

    assert_eq!(sink.count(), 10);
    assert_eq!(logward.metrics().emitted(), 10);
    assert_eq!(logward.metrics().suppressed(), 10);
    assert_eq!(logward.metrics().queue_drops(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_worker_keeps_queue_fifo_per_key() {
    let sink = CaptureSink::new();
    let logward = runtime(&sink);
    let logger = logward.logger("import::ordered");

    for i in 0..12 {
        logger.accumulate("EVERY_2", &[&i]);
    }
    logward.shutdown().await.expect("drain failed");

    // Trips happen on the 2nd, 4th, ... call; worker preserves that order
    let texts: Vec<String> = sink.captured().into_iter().map(|e| e.text).collect();
    assert_eq!(
        texts,
        ["batch 1", "batch 3", "batch 5", "batch 7", "batch 9", "batch 11"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_accumulation_after_shutdown_degrades_to_drop() {
    let sink = CaptureSink::new();
    let logward = runtime(&sink);
    let logger = logward.logger("import::late");

    logward.shutdown().await.expect("drain failed");

    // The throttle still trips, but the queued emission is dropped and counted
    logger.accumulate("EVERY_2", &[&1]);
    logger.accumulate("EVERY_2", &[&2]);

    assert_eq!(sink.count(), 0);
    assert_eq!(logward.metrics().queue_drops(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_normal_emissions_are_unaffected_by_worker() {
    let sink = CaptureSink::new();
    let logward = runtime(&sink);
    let logger = logward.logger("server::core");

    // Template and audit paths are synchronous regardless of the worker
    logger.log_rest_server_start();
    logger.audit().log_start_service("svc-1");
    assert_eq!(sink.count(), 2);

    logward.shutdown().await.expect("drain failed");

    logger.log_server_shutdown();
    assert_eq!(sink.count(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_components_shut_down_cleanly() {
    let mut runtimes = vec![];
    for i in 0..5 {
        let sink = CaptureSink::new();
        let logward = runtime(&sink);
        logward
            .logger(format!("component::{}", i))
            .accumulate("EVERY_2", &[&i]);
        runtimes.push((sink, logward));
    }

    for (_sink, logward) in &runtimes {
        logward.shutdown().await.expect("drain failed");
    }
}
