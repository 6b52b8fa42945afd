//! Markup checking for the XHTML response gate.
//!
//! This crate holds the pure, I/O-free half of the gate:
//!
//! - **Rewriting** via [`Rewriter`], an ordered table of regex rules that
//!   bridges common HTML5 constructs to strict XHTML
//! - **Strict parsing** via [`StrictParser`], which never recovers from
//!   malformed input
//! - **Schema validation** via [`SchemaValidator`] against a compiled
//!   [`Schema`], bundled as XHTML 1.1 Strict (with the Ruby module)
//!
//! [`MarkupChecker`] runs all three in order and reports
//! [`LocatedError`]s against the rewritten text.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use xhtml_gate_markup::{MarkupChecker, Schema};
//!
//! let checker = MarkupChecker::xhtml(Arc::new(Schema::xhtml()?))?;
//! let report = checker.check("<html><head><title>t</title></head><body/></html>");
//! assert!(report.is_valid());
//! # Ok::<(), xhtml_gate_markup::MarkupError>(())
//! ```

mod checker;
mod error;
mod located;
mod parser;
mod position;
mod rewriter;
mod rules;
mod schema;

pub use checker::{CheckReport, MarkupChecker};
pub use error::MarkupError;
pub use located::{ErrorStage, LocatedError};
pub use parser::{ParsedDocument, StrictParser};
pub use rewriter::{RewriteResult, RewriteRule, Rewriter};
pub use rules::{
    SCRIPT_TYPE, XHTML_NAMESPACE, XHTML_ROOT_TAG, XHTML_STRICT_DOCTYPE, XHTML_STRICT_PUBLIC_ID,
    XHTML_STRICT_SYSTEM_ID, xhtml_rule_names,
};
pub use schema::{ContentDefinition, ElementDefinition, Schema, SchemaDefinition, SchemaValidator};
