//! Shared state and messages between race workers and the coordinator.

use crate::puzzle::Puzzle;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Message sent from a worker to the coordinator.
#[derive(Debug)]
pub enum WorkerMessage {
    /// Worker built and validated a puzzle.
    Solved { worker_id: usize, puzzle: Puzzle },
}

/// Counters and flags shared by every worker.
///
/// The counters are advisory telemetry: they are bumped and read with relaxed
/// ordering, so a snapshot may lag slightly behind the workers.
#[derive(Debug, Default)]
pub struct SharedState {
    attempts: AtomicU64,
    validations: AtomicU64,
    /// Set once some worker has claimed the win.
    solved: AtomicBool,
    /// Set by the coordinator once the race is decided.
    should_stop: AtomicBool,
}

impl SharedState {
    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn validations(&self) -> u64 {
        self.validations.load(Ordering::Relaxed)
    }

    /// Claim the win. Returns true for exactly one caller.
    pub fn claim_win(&self) -> bool {
        self.solved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::Acquire)
    }

    /// The stop flag itself, for long-running checks that poll it.
    pub fn stop_flag(&self) -> &AtomicBool {
        &self.should_stop
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::Release);
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    pub shared: Arc<SharedState>,
}

/// Create channels for a race with the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let shared = Arc::new(SharedState::default());

    // Unbounded so a winning worker never blocks on send
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        shared,
    };

    (coordinator, worker_channels)
}
