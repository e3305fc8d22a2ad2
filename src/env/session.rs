//! Default in-process environment for one checking session

use crate::env::formulas::FormulaStore;
use crate::env::term::{Formula, Term, check_consistency};
use crate::env::{SymbolicEnv, TableIdSource};
use crate::error::Result;
use crate::schema::{SchemaRegistry, TableId};

/// Configuration for a [`Session`]
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Row bound given to tables built from a declared schema
    pub default_bound: usize,
    /// First id the session issues
    pub first_table_id: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_bound: 2,
            first_table_id: 0,
        }
    }
}

impl SessionConfig {
    pub fn with_default_bound(mut self, bound: usize) -> Self {
        self.default_bound = bound;
        self
    }

    pub fn with_first_table_id(mut self, id: u64) -> Self {
        self.first_table_id = id;
        self
    }
}

/// Environment that owns its id counter and formula store.
///
/// Sessions share nothing, so one session per worker keeps parallel checks
/// independent.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    next_id: u64,
    formulas: FormulaStore<Formula>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            next_id: config.first_table_id,
            config,
            formulas: FormulaStore::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build base tables for a JSON schema using the configured default bound.
    pub fn load_schema(&mut self, json: &str) -> Result<SchemaRegistry> {
        let bound = self.config.default_bound;
        SchemaRegistry::from_json(json, bound, self)
    }

    /// Ids issued so far
    pub fn tables_issued(&self) -> u64 {
        self.next_id - self.config.first_table_id
    }

    pub fn assert(&mut self, formula: Formula, label: &str) {
        self.formulas.append(formula, label);
    }

    /// Whether the assertions made so far have a model
    pub fn is_consistent(&self) -> bool {
        check_consistency(self.formulas.formulas())
    }
}

impl TableIdSource for Session {
    fn next_table_id(&mut self) -> TableId {
        let id = TableId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl SymbolicEnv for Session {
    type Term = Term;
    type Formula = Formula;

    fn grouping(&mut self, table: TableId, tuple: usize, group: usize) -> Term {
        Term::Grouping {
            table,
            tuple,
            group,
        }
    }

    fn size(&mut self, table: TableId) -> Term {
        Term::Size { table }
    }

    fn equal(&self, lhs: &Term, rhs: &Term) -> Formula {
        Formula::Eq(lhs.clone(), rhs.clone())
    }

    fn formulas(&self) -> &FormulaStore<Formula> {
        &self.formulas
    }

    fn formulas_mut(&mut self) -> &mut FormulaStore<Formula> {
        &mut self.formulas
    }
}
