//! Runs a job over balanced chunks of work on scoped worker threads.

use crate::error::{Result, SymtabError};
use crate::parallel::channel::{SharedState, WorkerContext, WorkerMessage, create_channel};
use crate::parallel::config::ParallelConfig;
use crate::parallel::partition::{chunk_offsets, chunkify};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-worker statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerStatistics {
    pub worker_id: usize,
    /// Items in the worker's chunk.
    pub items: usize,
    /// Outputs the worker produced.
    pub outputs: usize,
    pub elapsed: Duration,
}

/// Result of a partitioned run.
#[derive(Debug)]
pub struct PartitionedRun<R> {
    /// Every worker's outputs, concatenated in chunk order.
    pub outputs: Vec<R>,
    /// Statistics for each worker that ran, by worker id.
    pub worker_statistics: Vec<WorkerStatistics>,
    pub elapsed: Duration,
}

/// Split `items` into `config.num_workers` chunks and run `work` on each
/// chunk in its own thread.
///
/// Each call of `work` should build whatever session state it needs itself;
/// nothing mutable is shared between workers. When a worker fails, workers
/// that have not started yet are cancelled, and among the workers that did
/// fail the one with the lowest id is reported. A worker that panics is
/// reported as `WorkerPanicked`.
pub fn run_partitioned<T, R, F>(
    items: &[T],
    config: &ParallelConfig,
    work: F,
) -> Result<PartitionedRun<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&WorkerContext, &[T]) -> Result<Vec<R>> + Sync,
{
    let start_time = Instant::now();
    let chunks = chunkify(items, config.num_workers)?;
    let offsets = chunk_offsets(&chunks);
    let num_workers = chunks.len();
    let shared = Arc::new(SharedState::default());
    let (to_coordinator, from_workers) = create_channel::<R>();

    let mut outputs_by_worker: Vec<Option<Vec<R>>> = (0..num_workers).map(|_| None).collect();
    let mut worker_stats = Vec::new();
    let mut failures: Vec<(usize, SymtabError)> = Vec::new();

    std::thread::scope(|scope| {
        let work = &work;
        let handles: Vec<_> = chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| !(config.skip_empty_chunks && chunk.is_empty()))
            .map(|(worker_id, &chunk)| {
                let ctx = WorkerContext::new(
                    worker_id,
                    num_workers,
                    offsets[worker_id],
                    Arc::clone(&shared),
                );
                let tx = to_coordinator.clone();
                tracing::debug!(worker_id, items = chunk.len(), "spawning partition worker");
                (worker_id, scope.spawn(move || run_worker(ctx, chunk, work, tx)))
            })
            .collect();

        // Only workers hold senders now, so the loop ends when all are done.
        drop(to_coordinator);

        for msg in from_workers.iter() {
            match msg {
                WorkerMessage::Finished {
                    worker_id,
                    outputs,
                    elapsed,
                } => {
                    worker_stats.push(WorkerStatistics {
                        worker_id,
                        items: chunks[worker_id].len(),
                        outputs: outputs.len(),
                        elapsed,
                    });
                    outputs_by_worker[worker_id] = Some(outputs);
                }
                WorkerMessage::Failed { worker_id, error } => {
                    tracing::warn!(worker_id, %error, "partition worker failed");
                    shared.signal_stop();
                    failures.push((worker_id, error));
                }
                WorkerMessage::Cancelled { worker_id } => {
                    tracing::debug!(worker_id, "partition worker cancelled");
                }
            }
        }

        for (worker_id, handle) in handles {
            if handle.join().is_err() {
                tracing::warn!(worker_id, "partition worker panicked");
                failures.push((worker_id, SymtabError::WorkerPanicked { worker_id }));
            }
        }
    });

    if !failures.is_empty() {
        failures.sort_by_key(|(worker_id, _)| *worker_id);
        let (_, error) = failures.swap_remove(0);
        return Err(error);
    }

    worker_stats.sort_by_key(|s| s.worker_id);
    let outputs = outputs_by_worker.into_iter().flatten().flatten().collect();

    Ok(PartitionedRun {
        outputs,
        worker_statistics: worker_stats,
        elapsed: start_time.elapsed(),
    })
}

/// Worker body: run the job on one chunk and report back.
fn run_worker<T, R, F>(ctx: WorkerContext, chunk: &[T], work: &F, tx: Sender<WorkerMessage<R>>)
where
    F: Fn(&WorkerContext, &[T]) -> Result<Vec<R>>,
{
    let worker_id = ctx.worker_id;
    if ctx.should_stop() {
        let _ = tx.send(WorkerMessage::Cancelled { worker_id });
        return;
    }

    let start = Instant::now();
    let msg = match work(&ctx, chunk) {
        Ok(outputs) => WorkerMessage::Finished {
            worker_id,
            outputs,
            elapsed: start.elapsed(),
        },
        Err(error) => WorkerMessage::Failed { worker_id, error },
    };
    let _ = tx.send(msg);
}
