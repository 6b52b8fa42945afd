//! The rewrite, parse and validate pipeline.

use std::sync::Arc;

use crate::error::MarkupError;
use crate::located::LocatedError;
use crate::parser::StrictParser;
use crate::rewriter::Rewriter;
use crate::schema::{Schema, SchemaValidator};

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    rewritten: String,
    num_replacements: usize,
    errors: Vec<LocatedError>,
}

impl CheckReport {
    /// Assembles a report from its parts.
    #[must_use]
    pub const fn new(rewritten: String, num_replacements: usize, errors: Vec<LocatedError>) -> Self {
        Self {
            rewritten,
            num_replacements,
            errors,
        }
    }

    /// Text after rewriting; line numbers in [`errors`](Self::errors)
    /// refer to this text.
    #[must_use]
    pub fn rewritten(&self) -> &str {
        &self.rewritten
    }

    /// Number of rewrite replacements made before parsing.
    #[must_use]
    pub const fn num_replacements(&self) -> usize {
        self.num_replacements
    }

    /// Problems found, in document order.
    #[must_use]
    pub fn errors(&self) -> &[LocatedError] {
        &self.errors
    }

    /// Consumes the report, returning the errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<LocatedError> {
        self.errors
    }

    /// Returns `true` when no problems were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks markup against a schema after applying a rewrite rule table.
///
/// Malformed input stops after parsing; schema validation only ever sees a
/// complete tree. The checker is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct MarkupChecker {
    rewriter: Rewriter,
    parser: StrictParser,
    validator: SchemaValidator,
}

impl MarkupChecker {
    /// Assembles a checker from its parts.
    #[must_use]
    pub const fn new(rewriter: Rewriter, parser: StrictParser, validator: SchemaValidator) -> Self {
        Self {
            rewriter,
            parser,
            validator,
        }
    }

    /// Builds the standard XHTML checker around a compiled schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the XHTML rewrite rules fail to compile.
    pub fn xhtml(schema: Arc<Schema>) -> Result<Self, MarkupError> {
        Ok(Self::new(
            Rewriter::xhtml()?,
            StrictParser::new(),
            SchemaValidator::new(schema),
        ))
    }

    /// Returns the schema in use.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        self.validator.schema()
    }

    /// Rewrites, parses and validates `source`.
    #[must_use]
    pub fn check(&self, source: &str) -> CheckReport {
        let rewrite = self.rewriter.rewrite(source);
        let num_replacements = rewrite.num_replacements();
        let rewritten = rewrite.into_output();

        let errors = match self.parser.parse(&rewritten) {
            Ok(parsed) => self.validator.validate(&parsed),
            Err(errors) => errors,
        };

        CheckReport::new(rewritten, num_replacements, errors)
    }
}
