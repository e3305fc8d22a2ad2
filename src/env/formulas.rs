//! Append-only store of labelled assertions

/// Label for bookkeeping assertions that belong to no particular operator
pub const MISC_LABEL: &str = "misc";

/// Ordered record of every assertion made in a session.
///
/// Entries can only be appended; nothing is removed or rewritten.
#[derive(Debug, Clone)]
pub struct FormulaStore<F> {
    entries: Vec<(F, String)>,
}

impl<F> Default for FormulaStore<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> FormulaStore<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, formula: F, label: impl Into<String>) {
        self.entries.push((formula, label.into()));
    }

    /// Append a batch under one label
    pub fn extend<I>(&mut self, formulas: I, label: &str)
    where
        I: IntoIterator<Item = F>,
    {
        self.entries
            .extend(formulas.into_iter().map(|f| (f, label.to_string())));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &str)> {
        self.entries.iter().map(|(f, label)| (f, label.as_str()))
    }

    pub fn formulas(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(f, _)| f)
    }

    /// Formulas carrying `label`, in insertion order
    pub fn labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a F> + 'a {
        self.entries
            .iter()
            .filter(move |(_, l)| l == label)
            .map(|(f, _)| f)
    }
}
