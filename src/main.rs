/*!
 * Readers-Writers Demo
 *
 * Runs the same mix of readers and writers against one lock under each
 * admission policy in turn, reporting the lock status while they work.
 * A final stage switches the policy while threads are blocked on the lock.
 *
 * Environment:
 * - RWLOCK_READERS / RWLOCK_WRITERS: thread counts (default 3 / 2)
 * - RWLOCK_READS_PER_READER / RWLOCK_WRITES_PER_WRITER: iterations (default 3 / 2)
 */

use policy_rwlock::{init_tracing, LockConfig, Policy, ReadersWritersLock};
use rand::Rng;
use std::error::Error;
use std::ops::Range;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Pause before a reader asks for the lock; held for half a draw
const READER_PAUSE_MS: Range<u64> = 50..200;
/// Pause before a writer asks for the lock; held for half a draw
const WRITER_PAUSE_MS: Range<u64> = 100..400;

/// Policies applied, in order, while the dynamic stage runs
const SWITCH_SEQUENCE: [Policy; 3] = [Policy::WriterPriority, Policy::ReaderPriority, Policy::Fair];

#[derive(Debug, Clone, Copy)]
struct DemoConfig {
    readers: usize,
    writers: usize,
    reads_per_reader: usize,
    writes_per_writer: usize,
}

impl DemoConfig {
    fn from_env() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            readers: env_usize("RWLOCK_READERS", 3)?,
            writers: env_usize("RWLOCK_WRITERS", 2)?,
            reads_per_reader: env_usize("RWLOCK_READS_PER_READER", 3)?,
            writes_per_writer: env_usize("RWLOCK_WRITES_PER_WRITER", 2)?,
        })
    }
}

/// Pacing of the reporting and switching threads
#[derive(Debug, Clone, Copy)]
struct Timing {
    status_interval: Duration,
    status_reports: usize,
    switch_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_millis(300),
            status_reports: 5,
            switch_interval: Duration::from_millis(800),
        }
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| format!("{} must be a non-negative integer: {}", key, e).into()),
        Err(_) => Ok(default),
    }
}

/// Draw a (think, hold) pair of pauses; the hold is half a fresh draw
fn pauses(rng: &mut impl Rng, range: &Range<u64>) -> (Duration, Duration) {
    let think = rng.gen_range(range.clone());
    let hold = rng.gen_range(range.clone()) / 2;
    (Duration::from_millis(think), Duration::from_millis(hold))
}

fn reader(lock: Arc<ReadersWritersLock>, shared: Arc<AtomicI64>, id: usize, reads: usize) {
    let mut rng = rand::thread_rng();
    for i in 0..reads {
        let (think, hold) = pauses(&mut rng, &READER_PAUSE_MS);
        thread::sleep(think);

        info!(reader = id, iteration = i + 1, "Reader wants to read");
        let guard = lock.read();
        let value = shared.load(Ordering::SeqCst);
        info!(reader = id, iteration = i + 1, value, "Reader reading");
        thread::sleep(hold);
        drop(guard);
        info!(reader = id, "Reader done");
    }
}

fn writer(lock: Arc<ReadersWritersLock>, shared: Arc<AtomicI64>, id: usize, writes: usize) {
    let mut rng = rand::thread_rng();
    for i in 0..writes {
        let (think, hold) = pauses(&mut rng, &WRITER_PAUSE_MS);
        thread::sleep(think);

        info!(writer = id, iteration = i + 1, "Writer wants to write");
        let guard = lock.write();
        let value = (id * 100 + i) as i64;
        shared.store(value, Ordering::SeqCst);
        info!(writer = id, iteration = i + 1, value, "Writer writing");
        thread::sleep(hold);
        drop(guard);
        info!(writer = id, "Writer done");
    }
}

fn spawn_named<F>(name: String, f: F) -> Option<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    match thread::Builder::new().name(name.clone()).spawn(f) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(thread = %name, error = %e, "Failed to spawn worker");
            None
        }
    }
}

fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            error!("Worker thread panicked");
        }
    }
}

fn run_policy(lock: &Arc<ReadersWritersLock>, policy: Policy, config: DemoConfig, timing: Timing) -> i64 {
    info!("=== Policy: {} ===", policy);

    let shared = Arc::new(AtomicI64::new(0));
    lock.set_policy(policy);

    let mut handles = Vec::with_capacity(config.readers + config.writers);
    for id in 1..=config.writers {
        let (lock, shared) = (Arc::clone(lock), Arc::clone(&shared));
        handles.extend(spawn_named(format!("writer-{}", id), move || {
            writer(lock, shared, id, config.writes_per_writer)
        }));
    }
    for id in 1..=config.readers {
        let (lock, shared) = (Arc::clone(lock), Arc::clone(&shared));
        handles.extend(spawn_named(format!("reader-{}", id), move || {
            reader(lock, shared, id, config.reads_per_reader)
        }));
    }

    let reporter = {
        let lock = Arc::clone(lock);
        spawn_named("status".to_string(), move || {
            for _ in 0..timing.status_reports {
                thread::sleep(timing.status_interval);
                lock.log_status("[STATUS]");
            }
        })
    };

    join_all(handles);
    join_all(reporter.into_iter().collect());

    let value = shared.load(Ordering::SeqCst);
    info!(shared_value = value, "=== Policy {} done ===", policy);
    lock.log_status("Final state:");
    value
}

/// Switch the policy under two readers and a writer while they contend
fn run_dynamic_switch(
    lock: &Arc<ReadersWritersLock>,
    reads: usize,
    writes: usize,
    timing: Timing,
) -> i64 {
    info!("=== Dynamic policy switching ===");

    let shared = Arc::new(AtomicI64::new(0));
    lock.set_policy(Policy::Fair);

    let mut handles = Vec::with_capacity(3);
    for (name, id, is_writer) in [("reader-1", 1, false), ("writer-1", 1, true), ("reader-2", 2, false)] {
        let (lock, shared) = (Arc::clone(lock), Arc::clone(&shared));
        handles.extend(spawn_named(name.to_string(), move || {
            if is_writer {
                writer(lock, shared, id, writes)
            } else {
                reader(lock, shared, id, reads)
            }
        }));
    }

    for policy in SWITCH_SEQUENCE {
        thread::sleep(timing.switch_interval);
        info!(">>> Switching policy to {} <<<", policy);
        lock.set_policy(policy);
        lock.log_status("[STATUS]");
    }

    join_all(handles);
    shared.load(Ordering::SeqCst)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = DemoConfig::from_env()?;
    info!(
        readers = config.readers,
        writers = config.writers,
        reads_per_reader = config.reads_per_reader,
        writes_per_writer = config.writes_per_writer,
        "Readers-writers demo starting"
    );

    let lock = Arc::new(ReadersWritersLock::with_config(
        LockConfig::from_env().with_name("demo"),
    ));
    let timing = Timing::default();

    for policy in Policy::ALL {
        run_policy(&lock, policy, config, timing);
        thread::sleep(Duration::from_millis(500));
    }

    run_dynamic_switch(&lock, 15, 10, timing);

    println!("{}", serde_json::to_string_pretty(&lock.status())?);
    Ok(())
}
