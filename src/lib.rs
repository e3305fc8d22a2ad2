//! Symbolic table bookkeeping for a bounded SQL query-equivalence checker.
//!
//! The checker searches for a small database on which two queries disagree.
//! This crate keeps the auxiliary state of its symbolic tables consistent:
//! - [`grouping`]: ties a derived table's GROUP BY terms and row count to its
//!   source and makes the two share grouping bookkeeping and lineage
//! - [`placeholder`]: builds shape-only tables for operators that need a
//!   destination without a declared schema
//! - [`parallel`]: splits independent work into balanced chunks and runs them
//!   on separate workers
//!
//! Everything writes through an environment ([`env::SymbolicEnv`]) owned by
//! the caller; [`env::Session`] is the in-process one.

pub mod env;
pub mod error;
pub mod grouping;
pub mod parallel;
pub mod placeholder;
pub mod schema;

pub use env::{FormulaStore, Session, SessionConfig, SymbolicEnv, TableIdSource};
pub use error::{ErrorKind, Result, SymtabError};
pub use grouping::{PropagationSummary, propagate_grouping};
pub use parallel::{ParallelConfig, chunkify, run_partitioned};
pub use placeholder::create_empty_table;
pub use schema::{ColumnSchema, ColumnType, SchemaRegistry, TableId, TableSchema};
