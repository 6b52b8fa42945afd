//! Error types for building the markup pipeline.
//!
//! These cover construction of rewrite rules and schemas. Problems found in
//! the markup being checked are not errors: they are reported as
//! [`LocatedError`](crate::LocatedError) values.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from constructing rewrite rules or loading a schema.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// A rewrite rule's matcher is not a valid regular expression.
    #[error("invalid pattern for rule '{rule}': {message}")]
    InvalidPattern {
        /// Name of the offending rule.
        rule: String,
        /// Description of the compilation failure.
        message: String,
    },

    /// A rewrite rule's replacement references an undefined capture group.
    #[error("invalid replacement for rule '{rule}': {message}")]
    InvalidReplacement {
        /// Name of the offending rule.
        rule: String,
        /// Description of the replacement error.
        message: String,
    },

    /// The schema definition is malformed or inconsistent.
    #[error("invalid schema definition: {message}")]
    SchemaDefinition {
        /// Description of the problem.
        message: String,
    },

    /// The schema definition file could not be read.
    #[error("failed to read schema {}: {source}", path.display())]
    SchemaRead {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl MarkupError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid replacement error.
    #[must_use]
    pub fn invalid_replacement(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidReplacement {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Creates a schema definition error.
    #[must_use]
    pub fn schema_definition(message: impl Into<String>) -> Self {
        Self::SchemaDefinition {
            message: message.into(),
        }
    }

    /// Creates a schema read error.
    #[must_use]
    pub const fn schema_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::SchemaRead { path, source }
    }
}
