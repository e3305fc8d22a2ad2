//! Symbolic schema types: columns, tables, and the per-session registry

pub mod column;
pub mod registry;
pub mod table;

pub use column::{ColumnSchema, ColumnType};
pub use registry::{DeclaredColumn, DeclaredForeignKey, DeclaredTable, SchemaRegistry};
pub use table::{ForeignKey, GroupsConsidered, Lineage, TableCtx, TableId, TableSchema};
