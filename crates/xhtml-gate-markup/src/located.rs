//! Positioned problems found in checked markup.

use std::cmp::Ordering;
use std::fmt;

/// Pipeline stage that produced a [`LocatedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorStage {
    /// Malformed markup rejected by the strict parser.
    Syntax,
    /// Well-formed markup that does not conform to the schema.
    Schema,
}

impl fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => f.write_str("syntax"),
            Self::Schema => f.write_str("schema"),
        }
    }
}

/// A problem with a one-based line and a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatedError {
    /// Line number (one-based).
    pub line: u32,
    /// Column number.
    pub column: u32,
    /// Human-readable description of the problem.
    pub message: String,
    /// Stage that found the problem.
    pub stage: ErrorStage,
}

impl LocatedError {
    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line: line.max(1),
            column,
            message: message.into(),
            stage: ErrorStage::Syntax,
        }
    }

    /// Creates a schema violation.
    #[must_use]
    pub fn schema(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line: line.max(1),
            column,
            message: message.into(),
            stage: ErrorStage::Schema,
        }
    }

    /// Compares two errors by document position.
    #[must_use]
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

/// Renders the `[line:column]message` report form.
impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]{}", self.line, self.column, self.message)
    }
}
