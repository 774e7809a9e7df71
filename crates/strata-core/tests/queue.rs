// File: crates/strata-core/tests/queue.rs
// Purpose: Retry policy semantics and the background render queue.

use std::cell::Cell;
use std::sync::mpsc;
use std::time::Duration;

use strata_core::charts::BarChart;
use strata_core::{Chart, ChartConfig, ChartError, Decimal, RenderQueue, RetryPolicy};

fn quick(max_attempts: u32) -> RetryPolicy {
    RetryPolicy { max_attempts, initial_backoff: Duration::ZERO, ..RetryPolicy::default() }
}

#[test]
fn transient_failures_are_retried() {
    let calls = Cell::new(0);
    let got = quick(3).run("test", || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 {
            Err(ChartError::OutOfResources("raster".into()))
        } else {
            Ok(7)
        }
    });
    assert_eq!(got.unwrap(), 7);
    assert_eq!(calls.get(), 3);
}

#[test]
fn retries_stop_after_max_attempts() {
    let calls = Cell::new(0);
    let got: Result<(), _> = quick(2).run("test", || {
        calls.set(calls.get() + 1);
        Err(ChartError::OutOfResources("raster".into()))
    });
    assert!(matches!(got, Err(ChartError::OutOfResources(_))));
    assert_eq!(calls.get(), 2);
}

#[test]
fn permanent_failures_are_not_retried() {
    let calls = Cell::new(0);
    let got: Result<(), _> = quick(5).run("test", || {
        calls.set(calls.get() + 1);
        Err(ChartError::InvalidExtent("inverted".into()))
    });
    assert!(matches!(got, Err(ChartError::InvalidExtent(_))));
    assert_eq!(calls.get(), 1);
}

#[test]
fn backoff_grows_and_is_capped() {
    let policy = RetryPolicy {
        max_attempts: 5,
        initial_backoff: Duration::from_millis(10),
        multiplier: 2,
        max_backoff: Duration::from_millis(30),
    };
    assert_eq!(policy.backoff(1), Duration::from_millis(10));
    assert_eq!(policy.backoff(2), Duration::from_millis(20));
    assert_eq!(policy.backoff(3), Duration::from_millis(30));
    assert_eq!(policy.backoff(4), Duration::from_millis(30));
}

#[test]
fn queue_runs_jobs_in_order() {
    let queue = RenderQueue::new(RetryPolicy::none()).unwrap();
    let a = queue.submit_with("a", || Ok(1)).unwrap();
    let b = queue.submit_with("b", || Ok(2)).unwrap();
    assert_eq!(a.wait_timeout(Duration::from_secs(5)).unwrap(), 1);
    assert_eq!(b.wait().unwrap(), 2);
    queue.shutdown(Duration::from_secs(5)).unwrap();
}

#[test]
fn queue_reports_timeout() {
    let queue = RenderQueue::new(RetryPolicy::none()).unwrap();
    let slow = queue
        .submit_with("slow", || {
            std::thread::sleep(Duration::from_millis(200));
            Ok(())
        })
        .unwrap();
    let err = slow.wait_timeout(Duration::from_millis(1)).unwrap_err();
    assert!(matches!(err, ChartError::Timeout(_)));
    queue.shutdown(Duration::from_secs(5)).unwrap();
}

#[test]
fn pending_handle_polls_empty_until_done() {
    let queue = RenderQueue::new(RetryPolicy::none()).unwrap();
    let (release, gate) = mpsc::channel::<()>();
    let handle = queue
        .submit_with("gated", move || {
            let _ = gate.recv();
            Ok(5)
        })
        .unwrap();
    assert!(handle.try_take().is_none());

    release.send(()).unwrap();
    let got = loop {
        if let Some(res) = handle.try_take() {
            break res;
        }
        std::thread::sleep(Duration::from_millis(1));
    };
    assert_eq!(got.unwrap(), 5);
    queue.shutdown(Duration::from_secs(5)).unwrap();
}

#[test]
fn queue_renders_a_chart() {
    let counts = [Decimal::ONE, Decimal::TWO, Decimal::TEN];
    let bars = BarChart::from_counts(Decimal::ZERO, Decimal::ONE, &counts).unwrap();
    let chart = Chart::new(bars, ChartConfig::default().with_size(120, 80));
    let queue = RenderQueue::new(RetryPolicy::default()).unwrap();
    let handle = queue.submit(chart).unwrap();
    let img = handle.wait_timeout(Duration::from_secs(30)).unwrap();
    assert!(img.width >= 120 && img.height >= 80);
    assert_eq!(img.pixels.len(), img.stride * img.height as usize);
    queue.shutdown(Duration::from_secs(5)).unwrap();
}
