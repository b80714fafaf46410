//! Rule variable names

use std::fmt;

/// A rule variable. The name is stored without the `?` marker.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Create a variable; a leading `?` is dropped
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        Variable {
            name: name.strip_prefix('?').unwrap_or(name).to_string(),
        }
    }

    /// Get the variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this variable names the given column
    pub fn names_column(&self, column: &str) -> bool {
        column.strip_prefix('?').unwrap_or(column) == self.name
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}
