//! Solver-neutral symbolic terms and an equality consistency check

use std::collections::HashMap;
use std::fmt;

use crate::schema::TableId;

/// Symbolic integer term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Group of `tuple` in `table` under group slot `group`
    Grouping {
        table: TableId,
        tuple: usize,
        group: usize,
    },
    /// Row count of `table`
    Size { table: TableId },
    Int(i64),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Grouping {
                table,
                tuple,
                group,
            } => write!(f, "grouping({}, {}, {})", table, tuple, group),
            Term::Size { table } => write!(f, "size({})", table),
            Term::Int(v) => write!(f, "{}", v),
        }
    }
}

/// Symbolic assertion over [`Term`]s
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Eq(Term, Term),
    Ne(Term, Term),
}

impl Formula {
    pub fn equal(lhs: Term, rhs: Term) -> Self {
        Formula::Eq(lhs, rhs)
    }

    pub fn not_equal(lhs: Term, rhs: Term) -> Self {
        Formula::Ne(lhs, rhs)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Eq(lhs, rhs) => write!(f, "{} == {}", lhs, rhs),
            Formula::Ne(lhs, rhs) => write!(f, "{} != {}", lhs, rhs),
        }
    }
}

/// Union-find over term indices
#[derive(Debug, Default)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn add(&mut self) -> usize {
        self.parent.push(self.parent.len());
        self.parent.len() - 1
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

/// Decide whether a conjunction of equalities and disequalities has a model.
///
/// Terms are uninterpreted except integer literals, which are pairwise
/// distinct. The conjunction is unsatisfiable exactly when some `Ne` pair
/// ends up in one equivalence class, or a class holds two different literals.
pub fn check_consistency<'a, I>(formulas: I) -> bool
where
    I: IntoIterator<Item = &'a Formula>,
{
    let mut index: HashMap<&'a Term, usize> = HashMap::new();
    let mut uf = UnionFind::default();
    let mut disequalities = Vec::new();

    let mut intern = |term: &'a Term, uf: &mut UnionFind| -> usize {
        *index.entry(term).or_insert_with(|| uf.add())
    };

    for formula in formulas {
        match formula {
            Formula::Eq(lhs, rhs) => {
                let (a, b) = (intern(lhs, &mut uf), intern(rhs, &mut uf));
                uf.union(a, b);
            }
            Formula::Ne(lhs, rhs) => {
                let (a, b) = (intern(lhs, &mut uf), intern(rhs, &mut uf));
                disequalities.push((a, b));
            }
        }
    }

    for (a, b) in disequalities {
        if uf.find(a) == uf.find(b) {
            return false;
        }
    }

    let mut literal_of_class: HashMap<usize, i64> = HashMap::new();
    for (term, &idx) in &index {
        if let Term::Int(value) = term {
            let root = uf.find(idx);
            match literal_of_class.get(&root) {
                Some(existing) if existing != value => return false,
                Some(_) => {}
                None => {
                    literal_of_class.insert(root, *value);
                }
            }
        }
    }
    true
}
