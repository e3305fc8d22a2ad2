//! Configuration for partitioned parallel execution.

/// Configuration for partitioned parallel execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of chunks, and so the most worker threads, to use.
    pub num_workers: usize,
    /// Whether to skip spawning a thread for an empty chunk.
    pub skip_empty_chunks: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            skip_empty_chunks: true,
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Spawn (or not) a worker for chunks that received no items.
    pub fn with_skip_empty_chunks(mut self, skip: bool) -> Self {
        self.skip_empty_chunks = skip;
        self
    }
}
