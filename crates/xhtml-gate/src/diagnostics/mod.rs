//! Evidence left behind by a failed check.
//!
//! The [`DiagnosticSink`] persists the checked text so the reported line
//! numbers can be looked up later; the [`report`] functions turn located
//! errors into the text report and the replacement page.

mod report;
mod sink;

pub use report::{DIAGNOSTIC_CONTENT_TYPE, format_report, render_page};
pub use sink::{DiagnosticSink, PersistenceError, TempFileSink};
