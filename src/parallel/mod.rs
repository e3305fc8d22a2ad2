//! Partitioned parallel execution of independent checking work.
//!
//! The external engine fans independent units of search work (candidate
//! bounds, group-count hypotheses, query pairs) out to workers. This module
//! provides:
//! - a **partitioner** that splits a sequence into balanced contiguous chunks
//! - a **coordinator** that runs one scoped worker thread per chunk and
//!   reassembles the outputs in input order
//! - a **channel** carrying worker results and a shared stop flag
//!
//! Workers share no mutable bookkeeping state: each one builds its own
//! [`Session`](crate::env::Session).
//!
//! # Example
//!
//! ```
//! use sqleq_symtab::parallel::{ParallelConfig, run_partitioned};
//!
//! let bounds: Vec<usize> = (1..=8).collect();
//! let config = ParallelConfig::default().with_workers(3);
//! let run = run_partitioned(&bounds, &config, |_ctx, chunk| {
//!     Ok(chunk.iter().map(|b| b * 10).collect())
//! })
//! .unwrap();
//! assert_eq!(run.outputs, vec![10, 20, 30, 40, 50, 60, 70, 80]);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod partition;

pub use channel::WorkerContext;
pub use config::ParallelConfig;
pub use coordinator::{PartitionedRun, WorkerStatistics, run_partitioned};
pub use partition::chunkify;
