//! Column schema and column types

use std::fmt;

use crate::error::{Result, SymtabError};

/// SQL value types a symbolic column can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    Int,
    Varchar,
    Real,
    Date,
    Bool,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => write!(f, "int"),
            ColumnType::Varchar => write!(f, "varchar"),
            ColumnType::Real => write!(f, "real"),
            ColumnType::Date => write!(f, "date"),
            ColumnType::Bool => write!(f, "bool"),
        }
    }
}

impl std::str::FromStr for ColumnType {
    type Err = SymtabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "int" | "integer" | "bigint" => Ok(ColumnType::Int),
            "varchar" | "text" | "string" => Ok(ColumnType::Varchar),
            "real" | "float" | "double" => Ok(ColumnType::Real),
            "date" => Ok(ColumnType::Date),
            "bool" | "boolean" => Ok(ColumnType::Bool),
            _ => Err(SymtabError::Schema(format!(
                "unknown column type '{}'. Valid options: int, varchar, real, date, bool",
                s
            ))),
        }
    }
}

/// One attribute of a symbolic table
///
/// `column_id` is the column's position in its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    column_id: usize,
    name: String,
    ty: ColumnType,
    table_name: String,
}

impl ColumnSchema {
    pub(crate) fn new(
        column_id: usize,
        name: impl Into<String>,
        ty: ColumnType,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            column_id,
            name: name.into(),
            ty,
            table_name: table_name.into(),
        }
    }

    pub fn column_id(&self) -> usize {
        self.column_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ColumnType {
        self.ty
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// `table.column` form used by declared constraints
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name, self.name)
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.table_name, self.name, self.ty)
    }
}
