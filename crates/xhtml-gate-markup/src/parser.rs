//! Strict, non-recovering XML parsing.
//!
//! Parsing stops at the first malformed construct. No partial tree is ever
//! handed to later stages: either the whole text parses into a
//! [`ParsedDocument`] or the caller gets located syntax errors.

use roxmltree::{Document, ParsingOptions};

use crate::located::LocatedError;
use crate::position::text_pos_to_line_column;

/// A successfully parsed document borrowing the checked text.
#[derive(Debug)]
pub struct ParsedDocument<'input> {
    document: Document<'input>,
}

impl<'input> ParsedDocument<'input> {
    /// Returns the underlying `roxmltree` document.
    #[must_use]
    pub const fn document(&self) -> &Document<'input> {
        &self.document
    }

    /// Returns the document element.
    #[must_use]
    pub fn root_element(&self) -> roxmltree::Node<'_, 'input> {
        self.document.root_element()
    }

    /// Returns the text that was parsed.
    #[must_use]
    pub fn source(&self) -> &'input str {
        self.document.input_text()
    }
}

/// Strict XML parser.
///
/// Document type declarations are accepted so that doctype lines survive,
/// but external subsets are never fetched. Entities other than the five
/// predefined XML ones must therefore be declared inline.
#[derive(Debug, Clone, Copy)]
pub struct StrictParser {
    allow_dtd: bool,
}

impl StrictParser {
    /// Creates a parser that accepts document type declarations.
    #[must_use]
    pub const fn new() -> Self {
        Self { allow_dtd: true }
    }

    /// Creates a parser that rejects any document type declaration.
    #[must_use]
    pub const fn without_dtd() -> Self {
        Self { allow_dtd: false }
    }

    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns the syntax errors that stopped parsing, in document order.
    /// The list is never empty.
    pub fn parse<'input>(
        &self,
        source: &'input str,
    ) -> Result<ParsedDocument<'input>, Vec<LocatedError>> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = self.allow_dtd;

        Document::parse_with_options(source, options)
            .map(|document| ParsedDocument { document })
            .map_err(|error| vec![syntax_error(&error)])
    }
}

impl Default for StrictParser {
    fn default() -> Self {
        Self::new()
    }
}

fn syntax_error(error: &roxmltree::Error) -> LocatedError {
    let (line, column) = text_pos_to_line_column(error.pos());
    LocatedError::syntax(line, column, error.to_string())
}
