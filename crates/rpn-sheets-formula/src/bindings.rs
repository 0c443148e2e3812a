//! Variable bindings consulted during evaluation

use crate::error::{FormulaError, FormulaResult};
use ahash::AHashMap;

/// A mapping from variable names to values
///
/// Names are opaque to the engine; callers choose the key format (e.g. "B4").
pub trait VarTable {
    /// Value bound to `name`, or [`FormulaError::UnboundVariable`]
    fn get(&self, name: &str) -> FormulaResult<f64>;

    /// Bind `name` to `value`, replacing any previous value
    fn set(&mut self, name: &str, value: f64);

    /// Whether `name` has a value
    fn contains(&self, name: &str) -> bool;

    /// Number of bound names
    fn len(&self) -> usize;

    /// Whether no names are bound
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`VarTable`] backed by a hash map
#[derive(Debug, Clone, Default)]
pub struct MapVarTable {
    vars: AHashMap<String, f64>,
}

impl MapVarTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`MapVarTable::new`]
    pub fn empty() -> Self {
        Self::new()
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all bindings in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.vars.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl VarTable for MapVarTable {
    fn get(&self, name: &str) -> FormulaResult<f64> {
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| FormulaError::UnboundVariable(name.to_string()))
    }

    fn set(&mut self, name: &str, value: f64) {
        match self.vars.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.vars.insert(name.to_string(), value);
            }
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for MapVarTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<S: Into<String>> Extend<(S, f64)> for MapVarTable {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.vars.insert(name.into(), value);
        }
    }
}
