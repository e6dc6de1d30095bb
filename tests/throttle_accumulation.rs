//! Integration tests for accumulation throttling through the facade.

use logward::infrastructure::mocks::{CaptureSink, FixedClock};
use logward::{Logward, Template};
use std::sync::Arc;

const EVERY_3: Template = Template::with_threshold("EVERY_3", "Processed {} items", 3);

fn sync_runtime(sink: &CaptureSink) -> Logward {
    // Without the worker the tripped emissions are written synchronously,
    // which keeps the assertions deterministic
    let builder = Logward::builder()
        .with_sink(Arc::new(sink.clone()))
        .with_clock(Arc::new(FixedClock::default()))
        .with_templates(&[EVERY_3]);
    #[cfg(feature = "async")]
    let builder = builder.without_worker();
    builder.build().expect("valid config")
}

#[test]
fn test_seven_events_at_threshold_three_emit_twice() {
    let sink = CaptureSink::new();
    let logward = sync_runtime(&sink);
    let logger = logward.logger("import::batch");

    for i in 0..7 {
        logger.accumulate("EVERY_3", &[&i]);
    }

    // Trips on the 3rd and 6th call; the 7th starts a fresh cycle at 1
    let events = sink.captured();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].text, "Processed 2 items");
    assert_eq!(events[1].text, "Processed 5 items");

    let template = logward.templates().lookup("EVERY_3");
    assert_eq!(
        logward
            .throttle()
            .pending(&"import::batch".into(), template),
        Some(1)
    );
}

#[test]
fn test_threshold_zero_template_always_emits() {
    let sink = CaptureSink::new();
    let logward = sync_runtime(&sink);
    let logger = logward.logger("auth::service");

    // USER_LOGOUT declares no threshold
    for _ in 0..5 {
        logger.accumulate("USER_LOGOUT", &[&"u1"]);
    }
    assert_eq!(sink.count(), 5);
    assert!(logward.throttle().is_empty());
}

#[test]
fn test_unknown_template_accumulates_as_always_emit() {
    let sink = CaptureSink::new();
    let logward = sync_runtime(&sink);

    // UNKNOWN sentinel has threshold 0 and an empty pattern
    logward.logger("x").accumulate("NO_SUCH", &[]);
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.captured()[0].text, "");
}

#[test]
fn test_owners_throttle_independently() {
    let sink = CaptureSink::new();
    let logward = sync_runtime(&sink);

    let alpha = logward.logger("worker::alpha");
    let beta = logward.logger("worker::beta");

    for _ in 0..3 {
        alpha.accumulate("EVERY_3", &[&"a"]);
    }
    for _ in 0..2 {
        beta.accumulate("EVERY_3", &[&"b"]);
    }

    // Alpha tripped once; beta is mid-cycle
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.captured()[0].owner, "worker::alpha");
}

#[test]
fn test_concurrent_accumulation_is_exact() {
    use std::thread;

    let sink = CaptureSink::new();
    let logward = Arc::new(sync_runtime(&sink));

    // 6 threads x 50 events = 300 events at threshold 3 => exactly 100 trips
    let mut handles = vec![];
    for _ in 0..6 {
        let logward = Arc::clone(&logward);
        handles.push(thread::spawn(move || {
            let logger = logward.logger("import::concurrent");
            for i in 0..50 {
                logger.accumulate("EVERY_3", &[&i]);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.count(), 100);
    assert_eq!(logward.metrics().suppressed(), 200);
    assert_eq!(logward.metrics().emitted(), 100);
}

#[test]
fn test_suppressed_events_are_counted_not_written() {
    let sink = CaptureSink::new();
    let logward = sync_runtime(&sink);
    let logger = logward.logger("import::batch");

    logger.accumulate("EVERY_3", &[&1]);
    logger.accumulate("EVERY_3", &[&2]);

    assert_eq!(sink.count(), 0);
    assert_eq!(logward.metrics().suppressed(), 2);
}
