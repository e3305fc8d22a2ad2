//! Shape-only placeholder tables

use crate::env::TableIdSource;
use crate::error::{Result, SymtabError};
use crate::schema::{ColumnType, TableSchema};

/// Name given to a `row` x `col` placeholder. Not unique per session.
pub fn placeholder_name(row: usize, col: usize) -> String {
    format!("empty_table_{}x{}", row, col)
}

/// Build a table with `row` symbolic rows and `col` integer columns named
/// `"0".."col-1"`, with no business schema behind it.
///
/// The table gets a fresh id but is not registered anywhere, and nothing is
/// asserted. Repeated calls with the same shape produce the same name, so
/// callers must tell placeholders apart by id.
pub fn create_empty_table<I: TableIdSource>(
    row: usize,
    col: usize,
    ids: &mut I,
) -> Result<TableSchema> {
    if row == 0 {
        return Err(SymtabError::ZeroBound);
    }

    let table_id = ids.next_table_id();
    let mut table = TableSchema::new(table_id, placeholder_name(row, col), row);
    for column_id in 0..col {
        table.push_column(column_id.to_string(), ColumnType::Int);
    }

    tracing::trace!(table = %table_id, row, col, "allocated placeholder table");
    Ok(table)
}
