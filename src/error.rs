//! Error types for table bookkeeping operations

use thiserror::Error;

use crate::schema::TableId;

/// Broad classification of a [`SymtabError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A table or derivation is set up in a way the operation cannot handle
    Configuration,
    /// A numeric argument is outside the range where the operation is defined
    DegenerateInput,
    /// A declared relational schema could not be turned into tables
    Schema,
    /// A parallel worker died
    Worker,
}

#[derive(Error, Debug)]
pub enum SymtabError {
    #[error("table {table} has no ancestors; grouping state cannot be propagated from it")]
    NoAncestors { table: TableId },

    #[error("table {table} has no considered group counts; nothing defines the group range")]
    NoGroupsConsidered { table: TableId },

    #[error("bound mismatch: table {table} has bound {found}, expected {expected}")]
    BoundMismatch {
        table: TableId,
        expected: usize,
        found: usize,
    },

    #[error("table {table} considers {groups} groups but its rows are bounded by {bound}")]
    GroupCountExceedsBound {
        table: TableId,
        groups: usize,
        bound: usize,
    },

    #[error("propagating from table {table} needs more than usize::MAX assertions")]
    SlotOverflow { table: TableId },

    #[error("cannot propagate grouping state from table {table} onto itself")]
    SelfPropagation { table: TableId },

    #[error("row bound must be positive")]
    ZeroBound,

    #[error("unknown table id {0}")]
    UnknownTable(TableId),

    #[error("worker count must be positive, got {workers}")]
    DegenerateWorkerCount { workers: usize },

    #[error("table id {0} is already registered")]
    DuplicateTableId(TableId),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },
}

impl SymtabError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SymtabError::NoAncestors { .. }
            | SymtabError::NoGroupsConsidered { .. }
            | SymtabError::BoundMismatch { .. }
            | SymtabError::GroupCountExceedsBound { .. }
            | SymtabError::SlotOverflow { .. }
            | SymtabError::SelfPropagation { .. }
            | SymtabError::ZeroBound
            | SymtabError::UnknownTable(_) => ErrorKind::Configuration,
            SymtabError::DegenerateWorkerCount { .. } => ErrorKind::DegenerateInput,
            SymtabError::DuplicateTableId(_) | SymtabError::Schema(_) | SymtabError::Json(_) => {
                ErrorKind::Schema
            }
            SymtabError::WorkerPanicked { .. } => ErrorKind::Worker,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type Result<T> = std::result::Result<T, SymtabError>;
