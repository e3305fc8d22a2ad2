//! Messages and shared state between partition workers and the coordinator.

use crate::error::SymtabError;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Message sent from workers to the coordinator.
#[derive(Debug)]
pub enum WorkerMessage<R> {
    /// Worker processed its whole chunk.
    Finished {
        worker_id: usize,
        outputs: Vec<R>,
        elapsed: Duration,
    },
    /// Worker's job returned an error.
    Failed {
        worker_id: usize,
        error: SymtabError,
    },
    /// Worker saw the stop flag before starting.
    Cancelled { worker_id: usize },
}

/// State every worker can read without going through the channel.
#[derive(Debug, Default)]
pub struct SharedState {
    should_stop: AtomicBool,
}

impl SharedState {
    /// Check if workers should stop.
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }
}

/// What a worker knows about its place in the run.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// Chunk index, also the worker's id.
    pub worker_id: usize,
    /// Total number of chunks in the run.
    pub num_workers: usize,
    /// Index of the chunk's first item in the full input.
    pub offset: usize,
    shared: Arc<SharedState>,
}

impl WorkerContext {
    pub(crate) fn new(
        worker_id: usize,
        num_workers: usize,
        offset: usize,
        shared: Arc<SharedState>,
    ) -> Self {
        Self {
            worker_id,
            num_workers,
            offset,
            shared,
        }
    }

    /// True once another worker has failed. Long jobs may poll this and bail.
    pub fn should_stop(&self) -> bool {
        self.shared.should_stop()
    }
}

/// Create the worker-to-coordinator channel.
///
/// Unbounded so a finishing worker never blocks on the coordinator.
pub fn create_channel<R>() -> (Sender<WorkerMessage<R>>, Receiver<WorkerMessage<R>>) {
    unbounded()
}
