//! Stress tests for concurrent use of shared relays
//!
//! These tests verify:
//! - Lines written from many threads never tear or get lost
//! - Reconfiguring a relay while other threads log is safe
//! - Receivers can be registered while a fan-out is in flight

use relay_logger::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 500;

/// Every line from every thread arrives whole
#[test]
fn test_concurrent_lines_stay_whole() {
    let buffer = SharedBuffer::new();
    let relay = Arc::new(Relay::new(Severity::Debug, "", Flags::NONE));
    relay.add_writer(buffer.clone(), Severity::Debug, "", Flags::NONE);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let relay = Arc::clone(&relay);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..MESSAGES_PER_THREAD {
                    relay.infof(format_args!("thread {} message {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let content = buffer.contents();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    assert!(lines
        .iter()
        .all(|line| line.starts_with("[INFO] thread ") && line.contains(" message ")));

    for t in 0..THREADS {
        let ours = format!("[INFO] thread {} message ", t);
        let count = lines.iter().filter(|line| line.starts_with(&ours)).count();
        assert_eq!(count, MESSAGES_PER_THREAD, "thread {} lost lines", t);
    }
}

/// Per-thread order is kept even though threads interleave
#[test]
fn test_per_thread_order_preserved() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("ordered.log");

    let relay = Arc::new(Relay::new(Severity::Debug, "", Flags::NONE));
    relay.add_writer(
        FileSink::open(&log_file).expect("Failed to open file sink"),
        Severity::Debug,
        "",
        Flags::NONE,
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let relay = Arc::clone(&relay);
            thread::spawn(move || {
                for i in 0..200 {
                    relay.noticeln(&[&t, &i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let mut next = [0usize; 4];
    for line in content.lines() {
        let fields: Vec<usize> = line
            .trim_start_matches("[NOTICE] ")
            .split(' ')
            .map(|n| n.parse().expect("numeric field"))
            .collect();
        let (t, i) = (fields[0], fields[1]);
        assert_eq!(i, next[t], "thread {} out of order", t);
        next[t] += 1;
    }
    assert_eq!(next, [200; 4]);
}

/// Verbosity, prefix and flag changes race with logging without tearing lines
#[test]
fn test_reconfigure_while_logging() {
    let buffer = SharedBuffer::new();
    let relay = Arc::new(Relay::new(Severity::Debug, "", Flags::NONE));
    let collector = relay.add_writer(buffer.clone(), Severity::Debug, "", Flags::NONE);
    let running = Arc::new(AtomicBool::new(true));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let relay = Arc::clone(&relay);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                while running.load(Ordering::Relaxed) {
                    relay.warn(&[&"steady"]);
                }
            })
        })
        .collect();

    for round in 0..200 {
        let verbosity = if round % 2 == 0 {
            Severity::Error
        } else {
            Severity::Debug
        };
        relay.set_verbosity(verbosity);
        relay.set_prefix(if round % 3 == 0 { "p" } else { "" });
        collector.set_flags(Flags::MSG_PREFIX, MaskOp::Xor);
    }
    running.store(false, Ordering::Relaxed);
    for handle in writers {
        handle.join().expect("logging thread panicked");
    }

    for line in buffer.contents().lines() {
        assert!(
            line == "[WARNING] steady" || line == "[WARNING] psteady",
            "torn line {:?}",
            line
        );
    }
}

/// Adding receivers during fan-out neither deadlocks nor drops registrations
#[test]
fn test_add_receivers_while_logging() {
    let relay = Arc::new(Relay::new(Severity::Debug, "", Flags::NONE));
    let running = Arc::new(AtomicBool::new(true));

    let logger = {
        let relay = Arc::clone(&relay);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                relay.debug(&[&"fan-out"]);
            }
        })
    };

    let buffers: Vec<SharedBuffer> = (0..50)
        .map(|_| {
            let buffer = SharedBuffer::new();
            relay.add_writer(buffer.clone(), Severity::Debug, "", Flags::NONE);
            buffer
        })
        .collect();

    running.store(false, Ordering::Relaxed);
    logger.join().expect("logging thread panicked");
    assert_eq!(relay.len(), 50);

    relay.error(&[&"last"]);
    for buffer in &buffers {
        assert!(buffer.contents().ends_with("[ERROR] last\n"));
    }
}
