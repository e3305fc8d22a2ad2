//! Environment interface consumed by the bookkeeping operations
//!
//! The search/encoding engine owns an environment per checking session. This
//! crate only needs four things from it: fresh table ids, grouping and size
//! terms, equality between terms, and an append-only formula store.

pub mod formulas;
pub mod session;
pub mod term;
#[cfg(feature = "z3")]
pub mod z3_backend;

pub use formulas::{FormulaStore, MISC_LABEL};
pub use session::{Session, SessionConfig};
pub use term::{Formula, Term, check_consistency};
#[cfg(feature = "z3")]
pub use z3_backend::Z3Session;

use crate::schema::TableId;

/// Issues fresh table ids in strictly increasing order
pub trait TableIdSource {
    fn next_table_id(&mut self) -> TableId;
}

/// Symbolic environment the grouping propagator writes into
pub trait SymbolicEnv: TableIdSource {
    /// Symbolic integer term
    type Term;
    /// Symbolic boolean assertion
    type Formula;

    /// Group assigned to `tuple` of `table` under group slot `group`
    fn grouping(&mut self, table: TableId, tuple: usize, group: usize) -> Self::Term;

    /// Row count of `table`
    fn size(&mut self, table: TableId) -> Self::Term;

    /// Equality assertion between two terms
    fn equal(&self, lhs: &Self::Term, rhs: &Self::Term) -> Self::Formula;

    fn formulas(&self) -> &FormulaStore<Self::Formula>;

    fn formulas_mut(&mut self) -> &mut FormulaStore<Self::Formula>;
}
