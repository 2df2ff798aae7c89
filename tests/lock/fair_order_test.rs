/*!
 * Fair Policy Ordering Tests
 */

use super::{join_within, wait_until};
use policy_rwlock::{Access, Policy, ReadersWritersLock};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Log = Arc<Mutex<Vec<String>>>;

/// Spawn a request and wait until it has taken its place in the queue
fn enqueue(
    lock: &Arc<ReadersWritersLock>,
    log: &Log,
    label: &str,
    access: Access,
    hold: Duration,
) -> JoinHandle<()> {
    let queued = lock.status().queue_length;
    let (lock_clone, log, label) = (lock.clone(), log.clone(), label.to_string());

    let handle = thread::spawn(move || match access {
        Access::Read => {
            let _guard = lock_clone.read();
            log.lock().unwrap().push(label);
            thread::sleep(hold);
        }
        Access::Write => {
            let _guard = lock_clone.write();
            log.lock().unwrap().push(label);
            thread::sleep(hold);
        }
    });

    wait_until("request to queue", || lock.status().queue_length == queued + 1);
    handle
}

#[test]
fn test_alternating_requests_admitted_in_arrival_order() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
    let log: Log = Arc::default();

    // Hold the lock so every request below has to queue
    let gate = lock.write();

    let order = [
        ("R1", Access::Read),
        ("W1", Access::Write),
        ("R2", Access::Read),
        ("W2", Access::Write),
        ("R3", Access::Read),
    ];
    let handles = order
        .iter()
        .map(|&(label, access)| enqueue(&lock, &log, label, access, Duration::from_millis(10)))
        .collect();

    assert_eq!(lock.status().queue_length, 5);
    drop(gate);

    join_within(handles, Duration::from_secs(10));
    assert_eq!(*log.lock().unwrap(), vec!["R1", "W1", "R2", "W2", "R3"]);
    assert!(lock.status().is_idle());
}

#[test]
fn test_contiguous_readers_share_then_writer_follows() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
    let log: Log = Arc::default();
    let gate = lock.write();

    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for label in ["R1", "R2", "R3"] {
        let queued = lock.status().queue_length;
        let (lock_clone, log, inside, peak) =
            (lock.clone(), log.clone(), inside.clone(), peak.clone());
        handles.push(thread::spawn(move || {
            let _guard = lock_clone.read();
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            log.lock().unwrap().push(label.to_string());
            thread::sleep(Duration::from_millis(50));
            inside.fetch_sub(1, Ordering::SeqCst);
        }));
        wait_until("reader to queue", || lock.status().queue_length == queued + 1);
    }
    handles.push(enqueue(&lock, &log, "W1", Access::Write, Duration::ZERO));

    drop(gate);
    join_within(handles, Duration::from_secs(10));

    // Readers overlap with each other but the writer comes last
    assert_eq!(peak.load(Ordering::SeqCst), 3);
    let log = log.lock().unwrap();
    assert_eq!(log.last().map(String::as_str), Some("W1"));
    assert_eq!(log.len(), 4);
}

#[test]
fn test_reader_cannot_overtake_queued_writer() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
    let log: Log = Arc::default();

    // A reader holds the lock; a writer queues behind it
    let reader = lock.read();
    let writer = enqueue(&lock, &log, "W1", Access::Write, Duration::from_millis(10));

    // A later reader is compatible with the holder but must wait its turn
    let late = enqueue(&lock, &log, "R2", Access::Read, Duration::ZERO);
    assert_eq!(lock.status().active_readers, 1);
    assert_eq!(lock.status().waiting_readers, 1);

    drop(reader);
    join_within(vec![writer, late], Duration::from_secs(5));
    assert_eq!(*log.lock().unwrap(), vec!["W1", "R2"]);
}

#[test]
fn test_many_writers_admitted_in_arrival_order() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
    let log: Log = Arc::default();
    let gate = lock.write();

    let labels: Vec<String> = (1..=6).map(|i| format!("W{}", i)).collect();
    let handles = labels
        .iter()
        .map(|label| enqueue(&lock, &log, label, Access::Write, Duration::ZERO))
        .collect();

    drop(gate);
    join_within(handles, Duration::from_secs(10));
    assert_eq!(*log.lock().unwrap(), labels);
}
