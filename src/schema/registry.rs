//! Table registry and declared-schema loading
//!
//! Tables are keyed by [`TableId`] only. Names are not unique (placeholder
//! tables of the same shape share a name), so name lookups return every match.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::env::{SymbolicEnv, TableIdSource};
use crate::error::{Result, SymtabError};
use crate::grouping::{self, PropagationSummary};
use crate::schema::column::ColumnType;
use crate::schema::table::{ForeignKey, TableId, TableSchema};

/// A column as written in the declared schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredColumn {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub ty: String,
}

/// A foreign key as written in the declared schema. `parent_table` is the
/// position of the referenced table in the declared list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredForeignKey {
    #[serde(rename = "FName")]
    pub column: String,
    #[serde(rename = "PName")]
    pub parent_column: String,
    #[serde(rename = "PTable")]
    pub parent_table: String,
}

/// One table of the declared relational schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredTable {
    #[serde(rename = "TableName")]
    pub table_name: String,
    #[serde(rename = "PKeys", default)]
    pub primary_keys: Vec<DeclaredColumn>,
    #[serde(rename = "FKeys", default)]
    pub foreign_keys: Vec<DeclaredForeignKey>,
    #[serde(rename = "Others", default)]
    pub others: Vec<DeclaredColumn>,
}

impl DeclaredTable {
    fn find_plain_column(&self, name: &str) -> Option<&DeclaredColumn> {
        self.primary_keys
            .iter()
            .chain(self.others.iter())
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn find_foreign_key(&self, name: &str) -> Option<&DeclaredForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.column.eq_ignore_ascii_case(name))
    }
}

/// All symbolic tables of one session, keyed by id
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: BTreeMap<TableId, TableSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build base tables from a declared schema. Every table gets `bound` rows
    /// and ids are issued in declaration order.
    pub fn from_declared<I: TableIdSource>(
        declared: &[DeclaredTable],
        bound: usize,
        ids: &mut I,
    ) -> Result<Self> {
        if bound == 0 {
            return Err(SymtabError::ZeroBound);
        }

        // Dry run against positional ids so a bad schema consumes no real ids.
        let positional: Vec<TableId> = (0..declared.len()).map(|i| TableId(i as u64)).collect();
        for (decl, &table_id) in declared.iter().zip(&positional) {
            build_declared_table(declared, decl, table_id, &positional, bound)?;
        }

        // Issue all ids up front so foreign keys may point forward.
        let table_ids: Vec<TableId> = declared.iter().map(|_| ids.next_table_id()).collect();

        let mut registry = Self::new();
        for (decl, &table_id) in declared.iter().zip(&table_ids) {
            let table = build_declared_table(declared, decl, table_id, &table_ids, bound)?;
            registry.register(table)?;
        }

        tracing::debug!(tables = registry.len(), bound, "loaded declared schema");
        Ok(registry)
    }

    /// Parse the JSON schema format and build base tables from it.
    pub fn from_json<I: TableIdSource>(json: &str, bound: usize, ids: &mut I) -> Result<Self> {
        let declared: Vec<DeclaredTable> = serde_json::from_str(json)?;
        Self::from_declared(&declared, bound, ids)
    }

    pub fn register(&mut self, table: TableSchema) -> Result<TableId> {
        let table_id = table.table_id();
        if self.tables.contains_key(&table_id) {
            return Err(SymtabError::DuplicateTableId(table_id));
        }
        self.tables.insert(table_id, table);
        Ok(table_id)
    }

    pub fn get(&self, table_id: TableId) -> Option<&TableSchema> {
        self.tables.get(&table_id)
    }

    pub fn get_mut(&mut self, table_id: TableId) -> Option<&mut TableSchema> {
        self.tables.get_mut(&table_id)
    }

    pub fn table(&self, table_id: TableId) -> Result<&TableSchema> {
        self.get(table_id).ok_or(SymtabError::UnknownTable(table_id))
    }

    /// Shared snapshot of a registered table, for use as an ancestor.
    pub fn ancestor(&self, table_id: TableId) -> Result<Rc<TableSchema>> {
        self.table(table_id).map(|t| Rc::new(t.snapshot()))
    }

    /// Ids of every table with this name (case-insensitive), ascending.
    pub fn ids_named(&self, name: &str) -> Vec<TableId> {
        self.tables
            .values()
            .filter(|t| t.name().eq_ignore_ascii_case(name))
            .map(|t| t.table_id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Propagate grouping state between two registered tables.
    pub fn propagate_grouping<E: SymbolicEnv>(
        &mut self,
        copy_from: TableId,
        copy_to: TableId,
        env: &mut E,
    ) -> Result<PropagationSummary> {
        if copy_from == copy_to {
            return Err(SymtabError::SelfPropagation { table: copy_from });
        }
        if !self.tables.contains_key(&copy_from) {
            return Err(SymtabError::UnknownTable(copy_from));
        }
        let mut target = self
            .tables
            .remove(&copy_to)
            .ok_or(SymtabError::UnknownTable(copy_to))?;

        let result = match self.tables.get(&copy_from) {
            Some(source) => grouping::propagate_grouping(source, &mut target, env),
            None => Err(SymtabError::UnknownTable(copy_from)),
        };
        self.tables.insert(copy_to, target);
        result
    }
}

fn build_declared_table(
    declared: &[DeclaredTable],
    decl: &DeclaredTable,
    table_id: TableId,
    table_ids: &[TableId],
    bound: usize,
) -> Result<TableSchema> {
    let mut table = TableSchema::new(table_id, decl.table_name.as_str(), bound);

    let mut primary_key = Vec::with_capacity(decl.primary_keys.len());
    for col in &decl.primary_keys {
        check_unique(&table, &col.name)?;
        let ty: ColumnType = col.ty.parse()?;
        primary_key.push(table.push_column(col.name.as_str(), ty).column_id());
    }
    table.set_primary_key(primary_key);

    for fk in &decl.foreign_keys {
        let parent_idx = parent_index(declared, fk)?;
        let parent = &declared[parent_idx];
        let ty = resolve_type(declared, parent_idx, &fk.parent_column, 0)?;
        let references_column = declared_position(parent, &fk.parent_column).ok_or_else(|| {
            SymtabError::Schema(format!(
                "foreign key {}.{} references missing column {}.{}",
                decl.table_name, fk.column, parent.table_name, fk.parent_column
            ))
        })?;

        // A key column may also be a foreign key; it keeps its key position.
        let existing = table.column_by_name(&fk.column).map(|c| c.column_id());
        let column = match existing {
            Some(position) if decl.find_plain_column(&fk.column).is_some() => position,
            Some(_) => {
                return Err(SymtabError::Schema(format!(
                    "duplicate column {}.{}",
                    decl.table_name, fk.column
                )));
            }
            None => table.push_column(fk.column.as_str(), ty).column_id(),
        };
        table.add_foreign_key(ForeignKey {
            column,
            references_table: table_ids[parent_idx],
            references_column,
        });
    }

    for col in &decl.others {
        check_unique(&table, &col.name)?;
        let ty: ColumnType = col.ty.parse()?;
        table.push_column(col.name.as_str(), ty);
    }

    Ok(table)
}

fn check_unique(table: &TableSchema, name: &str) -> Result<()> {
    if table.column_by_name(name).is_some() {
        return Err(SymtabError::Schema(format!(
            "duplicate column {}.{}",
            table.name(),
            name
        )));
    }
    Ok(())
}

fn parent_index(declared: &[DeclaredTable], fk: &DeclaredForeignKey) -> Result<usize> {
    fk.parent_table
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&idx| idx < declared.len())
        .ok_or_else(|| {
            SymtabError::Schema(format!(
                "foreign key {} references unknown table '{}'",
                fk.column, fk.parent_table
            ))
        })
}

/// Type of a declared column, following foreign keys to their parent column.
fn resolve_type(
    declared: &[DeclaredTable],
    table_idx: usize,
    column: &str,
    depth: usize,
) -> Result<ColumnType> {
    if depth > declared.len() {
        return Err(SymtabError::Schema(format!(
            "foreign key cycle through {}.{}",
            declared[table_idx].table_name, column
        )));
    }
    let table = &declared[table_idx];
    if let Some(col) = table.find_plain_column(column) {
        return col.ty.parse();
    }
    match table.find_foreign_key(column) {
        Some(fk) => {
            let parent_idx = parent_index(declared, fk)?;
            resolve_type(declared, parent_idx, &fk.parent_column, depth + 1)
        }
        None => Err(SymtabError::Schema(format!(
            "unknown column {}.{}",
            table.table_name, column
        ))),
    }
}

/// Position a column will have once the declared table is built.
fn declared_position(decl: &DeclaredTable, column: &str) -> Option<usize> {
    let mut names: Vec<&str> = decl.primary_keys.iter().map(|c| c.name.as_str()).collect();
    for fk in &decl.foreign_keys {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&fk.column)) {
            names.push(fk.column.as_str());
        }
    }
    names.extend(decl.others.iter().map(|c| c.name.as_str()));
    names.iter().position(|n| n.eq_ignore_ascii_case(column))
}
