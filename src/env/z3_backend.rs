//! Z3-backed environment

use std::time::Duration;

use z3::ast::{Bool, Int};
use z3::{Params, SatResult, Solver};

use crate::env::formulas::FormulaStore;
use crate::env::{SymbolicEnv, TableIdSource};
use crate::schema::TableId;

/// Solver settings used by [`Z3Session::check`]
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Per-check timeout; `None` lets the solver run to completion
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl SolverConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fresh solver with these settings. Timeouts past `u32::MAX` ms saturate.
    pub fn solver(&self) -> Solver {
        let solver = Solver::new();
        if let Some(timeout) = self.timeout {
            let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
            let mut params = Params::new();
            params.set_u32("timeout", millis);
            solver.set_params(&params);
        }
        solver
    }
}

/// Environment whose terms are Z3 integer constants
pub struct Z3Session {
    next_id: u64,
    solver_config: SolverConfig,
    formulas: FormulaStore<Bool>,
}

impl Default for Z3Session {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Z3Session {
    pub fn new(solver_config: SolverConfig) -> Self {
        Self {
            next_id: 0,
            solver_config,
            formulas: FormulaStore::new(),
        }
    }

    /// Load every stored assertion into a fresh solver and check it
    pub fn check(&self) -> SatResult {
        let solver = self.solver_config.solver();
        for formula in self.formulas.formulas() {
            solver.assert(formula);
        }
        solver.check()
    }

    pub fn assert(&mut self, formula: Bool, label: &str) {
        self.formulas.append(formula, label);
    }
}

impl TableIdSource for Z3Session {
    fn next_table_id(&mut self) -> TableId {
        let id = TableId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl SymbolicEnv for Z3Session {
    type Term = Int;
    type Formula = Bool;

    fn grouping(&mut self, table: TableId, tuple: usize, group: usize) -> Int {
        Int::new_const(format!("grouping_{}_{}_{}", table, tuple, group))
    }

    fn size(&mut self, table: TableId) -> Int {
        Int::new_const(format!("size_{}", table))
    }

    fn equal(&self, lhs: &Int, rhs: &Int) -> Bool {
        lhs.eq(rhs)
    }

    fn formulas(&self) -> &FormulaStore<Bool> {
        &self.formulas
    }

    fn formulas_mut(&mut self) -> &mut FormulaStore<Bool> {
        &mut self.formulas
    }
}
