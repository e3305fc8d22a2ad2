//! Symbolic table schema and its per-table bookkeeping

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::schema::column::{ColumnSchema, ColumnType};

/// Session-unique table identifier. Ids are issued in strictly increasing
/// order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(pub u64);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group-count hypotheses already encoded for a table's GROUP BY.
///
/// Cloning the handle shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct GroupsConsidered(Rc<RefCell<BTreeSet<usize>>>);

impl GroupsConsidered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a group-count hypothesis. Returns false if it was already present.
    pub fn insert(&self, groups: usize) -> bool {
        self.0.borrow_mut().insert(groups)
    }

    pub fn contains(&self, groups: usize) -> bool {
        self.0.borrow().contains(&groups)
    }

    pub fn max(&self) -> Option<usize> {
        self.0.borrow().last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Values in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.0.borrow().iter().copied().collect()
    }

    /// True when both handles refer to the same set
    pub fn ptr_eq(&self, other: &GroupsConsidered) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Provenance tag: the base tables a symbolic table's rows come from.
///
/// Opaque to this crate beyond identity and the recorded sources. Cloning the
/// handle shares the tag.
#[derive(Debug, Clone, Default)]
pub struct Lineage(Rc<RefCell<BTreeSet<TableId>>>);

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(table: TableId) -> Self {
        let lineage = Self::new();
        lineage.record(table);
        lineage
    }

    pub fn record(&self, table: TableId) {
        self.0.borrow_mut().insert(table);
    }

    pub fn sources(&self) -> Vec<TableId> {
        self.0.borrow().iter().copied().collect()
    }

    pub fn ptr_eq(&self, other: &Lineage) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Auxiliary per-table state kept outside the relational schema.
///
/// The groups handle sits in a cell shared by every snapshot of the table, so
/// rebinding it during propagation is seen through all of them.
#[derive(Debug, Clone, Default)]
pub struct TableCtx {
    groups_considered: Rc<RefCell<GroupsConsidered>>,
}

impl TableCtx {
    pub fn groups_considered(&self) -> GroupsConsidered {
        self.groups_considered.borrow().clone()
    }

    pub(crate) fn share_groups_considered(&self, groups: GroupsConsidered) {
        *self.groups_considered.borrow_mut() = groups;
    }
}

/// Foreign key recorded from a declared schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Position of the referencing column in this table
    pub column: usize,
    pub references_table: TableId,
    /// Position of the referenced column in the referenced table
    pub references_column: usize,
}

/// One symbolic table in the bounded model
#[derive(Debug)]
pub struct TableSchema {
    table_id: TableId,
    name: String,
    bound: usize,
    columns: Vec<ColumnSchema>,
    ancestors: Vec<Rc<TableSchema>>,
    ctx: TableCtx,
    lineage: Rc<RefCell<Lineage>>,
    primary_key: Vec<usize>,
    foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Create a base table. Its lineage records only itself.
    pub fn new(table_id: TableId, name: impl Into<String>, bound: usize) -> Self {
        Self {
            table_id,
            name: name.into(),
            bound,
            columns: Vec::new(),
            ancestors: Vec::new(),
            ctx: TableCtx::default(),
            lineage: Rc::new(RefCell::new(Lineage::of(table_id))),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Create a table derived from `ancestors`. It starts with no considered
    /// group counts and a fresh lineage covering every ancestor's sources.
    pub fn derived(
        table_id: TableId,
        name: impl Into<String>,
        bound: usize,
        ancestors: Vec<Rc<TableSchema>>,
    ) -> Self {
        let lineage = Lineage::new();
        for ancestor in &ancestors {
            for source in ancestor.lineage().sources() {
                lineage.record(source);
            }
        }
        Self {
            ancestors,
            lineage: Rc::new(RefCell::new(lineage)),
            ..Self::new(table_id, name, bound)
        }
    }

    /// Copy of this table that shares its ctx and lineage cells, so it keeps
    /// tracking the original through later propagations. Used to hold a
    /// registered table as another table's ancestor.
    pub fn snapshot(&self) -> TableSchema {
        TableSchema {
            table_id: self.table_id,
            name: self.name.clone(),
            bound: self.bound,
            columns: self.columns.clone(),
            ancestors: self.ancestors.clone(),
            ctx: self.ctx.clone(),
            lineage: self.lineage.clone(),
            primary_key: self.primary_key.clone(),
            foreign_keys: self.foreign_keys.clone(),
        }
    }

    /// Append a column; its id is its position.
    pub fn push_column(&mut self, name: impl Into<String>, ty: ColumnType) -> &ColumnSchema {
        let column_id = self.columns.len();
        self.columns
            .push(ColumnSchema::new(column_id, name, ty, self.name.as_str()));
        &self.columns[column_id]
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of symbolic rows. Fixed at creation.
    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column(&self, column_id: usize) -> Option<&ColumnSchema> {
        self.columns.get(column_id)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn ancestors(&self) -> &[Rc<TableSchema>] {
        &self.ancestors
    }

    pub fn is_base(&self) -> bool {
        self.ancestors.is_empty()
    }

    pub fn ctx(&self) -> &TableCtx {
        &self.ctx
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage.borrow().clone()
    }

    pub(crate) fn share_lineage(&self, lineage: Lineage) {
        *self.lineage.borrow_mut() = lineage;
    }

    pub fn primary_key(&self) -> &[usize] {
        &self.primary_key
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub(crate) fn set_primary_key(&mut self, columns: Vec<usize>) {
        self.primary_key = columns;
    }

    pub(crate) fn add_foreign_key(&mut self, fk: ForeignKey) {
        self.foreign_keys.push(fk);
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}[bound={}](", self.name, self.table_id, self.bound)?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", col.name(), col.ty())?;
        }
        write!(f, ")")
    }
}
