/*!
 * Reader and Writer Priority Tests
 */

use super::{join_within, wait_until};
use policy_rwlock::{Policy, ReadersWritersLock};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_reader_priority_continuous_readers_delay_writer() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::ReaderPriority));
    let admitted = Arc::new(AtomicBool::new(false));

    let mut held = lock.read();

    let writer = {
        let (lock, admitted) = (lock.clone(), admitted.clone());
        thread::spawn(move || {
            let _guard = lock.write();
            admitted.store(true, Ordering::SeqCst);
        })
    };
    wait_until("writer to block", || lock.status().waiting_writers == 1);

    // Five readers arrive one after another, each overlapping the previous
    for _ in 0..5 {
        let next = lock.read();
        drop(held);
        held = next;

        thread::sleep(Duration::from_millis(10));
        assert!(!admitted.load(Ordering::SeqCst));
        assert_eq!(lock.status().waiting_writers, 1);
        assert_eq!(lock.status().active_readers, 1);
    }

    drop(held);
    join_within(vec![writer], Duration::from_secs(5));
    assert!(admitted.load(Ordering::SeqCst));
}

#[test]
fn test_reader_priority_waiting_readers_go_before_waiting_writer() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::ReaderPriority));
    let order = Arc::new(Mutex::new(Vec::new()));
    let gate = lock.write();

    let writer = {
        let (lock, order) = (lock.clone(), order.clone());
        thread::spawn(move || {
            let _guard = lock.write();
            order.lock().unwrap().push("writer");
        })
    };
    wait_until("writer to block", || lock.status().waiting_writers == 1);

    let mut handles: Vec<_> = (0..3)
        .map(|_| {
            let (lock, order) = (lock.clone(), order.clone());
            thread::spawn(move || {
                let _guard = lock.read();
                order.lock().unwrap().push("reader");
                thread::sleep(Duration::from_millis(10));
            })
        })
        .collect();
    wait_until("readers to block", || lock.status().waiting_readers == 3);

    drop(gate);
    handles.push(writer);
    join_within(handles, Duration::from_secs(5));

    assert_eq!(
        *order.lock().unwrap(),
        vec!["reader", "reader", "reader", "writer"]
    );
}

#[test]
fn test_writer_priority_blocks_new_readers() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::WriterPriority));
    let order = Arc::new(Mutex::new(Vec::new()));
    let held = lock.read();

    let writer = {
        let (lock, order) = (lock.clone(), order.clone());
        thread::spawn(move || {
            let _guard = lock.write();
            order.lock().unwrap().push("writer");
            thread::sleep(Duration::from_millis(10));
        })
    };
    wait_until("writer to block", || lock.status().waiting_writers == 1);

    // The lock is only read-held, yet a new reader must queue behind the writer
    assert!(lock.try_read().is_none());
    let reader = {
        let (lock, order) = (lock.clone(), order.clone());
        thread::spawn(move || {
            let _guard = lock.read();
            order.lock().unwrap().push("reader");
        })
    };
    wait_until("reader to block", || lock.status().waiting_readers == 1);

    drop(held);
    join_within(vec![writer, reader], Duration::from_secs(5));
    assert_eq!(*order.lock().unwrap(), vec!["writer", "reader"]);
}

#[test]
fn test_writer_priority_writers_drain_before_readers() {
    let lock = Arc::new(ReadersWritersLock::new(Policy::WriterPriority));
    let order = Arc::new(Mutex::new(Vec::new()));
    let gate = lock.write();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let (lock, order) = (lock.clone(), order.clone());
        handles.push(thread::spawn(move || {
            let _guard = lock.read();
            order.lock().unwrap().push("reader");
        }));
    }
    wait_until("readers to block", || lock.status().waiting_readers == 2);

    for _ in 0..2 {
        let (lock, order) = (lock.clone(), order.clone());
        handles.push(thread::spawn(move || {
            let _guard = lock.write();
            order.lock().unwrap().push("writer");
        }));
    }
    wait_until("writers to block", || lock.status().waiting_writers == 2);

    drop(gate);
    join_within(handles, Duration::from_secs(5));
    assert_eq!(
        *order.lock().unwrap(),
        vec!["writer", "writer", "reader", "reader"]
    );
}
