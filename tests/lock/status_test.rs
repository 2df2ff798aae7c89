/*!
 * Status Snapshot Tests
 */

use super::{join_within, wait_until};
use policy_rwlock::{LockConfig, LockStatus, Policy, ReadersWritersLock};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_status_reports_waiters_and_queue() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
    let gate = lock.write();

    let reader = {
        let lock = lock.clone();
        thread::spawn(move || {
            let _guard = lock.read();
        })
    };
    wait_until("reader to queue", || lock.status().queue_length == 1);

    let writer = {
        let lock = lock.clone();
        thread::spawn(move || {
            let _guard = lock.write();
        })
    };
    wait_until("writer to queue", || lock.status().queue_length == 2);

    assert_eq!(
        lock.status(),
        LockStatus {
            active_readers: 0,
            waiting_readers: 1,
            active_writers: 1,
            waiting_writers: 1,
            writer_active: true,
            policy: Policy::Fair,
            queue_length: 2,
        }
    );

    drop(gate);
    join_within(vec![reader, writer], Duration::from_secs(5));
    assert!(lock.status().is_idle());
}

#[test]
fn test_status_does_not_wait_for_blocked_acquirers() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::WriterPriority));
    let held = lock.read();

    let writer = {
        let lock = lock.clone();
        thread::spawn(move || {
            let _guard = lock.write();
        })
    };
    wait_until("writer to block", || lock.status().waiting_writers == 1);

    let start = Instant::now();
    for _ in 0..1_000 {
        assert!(lock.status().verify().is_ok());
    }
    assert!(start.elapsed() < Duration::from_secs(1));

    drop(held);
    join_within(vec![writer], Duration::from_secs(5));
}

#[test]
fn test_status_json_round_trip() {
    let lock = ReadersWritersLock::with_config(
        LockConfig::default()
            .with_policy(Policy::ReaderPriority)
            .with_name("json"),
    );
    let _reader = lock.read();

    let status = lock.status();
    let json = serde_json::to_value(status).unwrap();
    assert_eq!(json["policy"], "reader_priority");
    assert_eq!(json["active_readers"], 1);

    let parsed: LockStatus = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, status);
}

#[test]
fn test_status_display() {
    let lock = ReadersWritersLock::new(Policy::Fair);
    let _writer = lock.write();

    assert_eq!(
        lock.status().to_string(),
        "active readers: 0, waiting readers: 0, active writers: 1 (writer active: yes), waiting writers: 0, queue: 0, policy: fair"
    );
}
