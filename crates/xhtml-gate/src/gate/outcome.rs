//! Outcomes of gating a response.

use std::path::{Path, PathBuf};

use xhtml_gate_markup::LocatedError;

use super::conditions::{FAILURE_STATUS, Response, SkipReason};
use crate::diagnostics::{DIAGNOSTIC_CONTENT_TYPE, format_report, render_page};

/// Result of gating one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// An entry condition failed; the response was not checked.
    Skipped(SkipReason),
    /// The markup parsed and validated cleanly.
    Passed,
    /// The markup failed to parse or validate.
    Failed(GateFailure),
}

impl GateResult {
    /// Returns whether the response will be replaced.
    #[must_use]
    pub const fn replaces_response(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the failure details, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&GateFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Skipped(_) | Self::Passed => None,
        }
    }

    /// Produces the response to send.
    ///
    /// Skipped and passed responses are returned untouched. A failed
    /// response is discarded in favour of the diagnostic page with status
    /// [`FAILURE_STATUS`].
    #[must_use]
    pub fn apply_to(&self, response: Response) -> Response {
        match self {
            Self::Skipped(_) | Self::Passed => response,
            Self::Failed(failure) => Response::new(
                FAILURE_STATUS,
                DIAGNOSTIC_CONTENT_TYPE,
                failure.render_page(),
            ),
        }
    }
}

/// Details of a failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateFailure {
    errors: Vec<LocatedError>,
    artifact_path: PathBuf,
    checked_text: String,
}

impl GateFailure {
    /// Creates failure details.
    #[must_use]
    pub const fn new(
        errors: Vec<LocatedError>,
        artifact_path: PathBuf,
        checked_text: String,
    ) -> Self {
        Self {
            errors,
            artifact_path,
            checked_text,
        }
    }

    /// Problems found, in document order.
    #[must_use]
    pub fn errors(&self) -> &[LocatedError] {
        &self.errors
    }

    /// Path of the persisted artifact.
    #[must_use]
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// The rewritten text that was checked and persisted.
    #[must_use]
    pub fn checked_text(&self) -> &str {
        &self.checked_text
    }

    /// Text report: error lines followed by the artifact path.
    #[must_use]
    pub fn report(&self) -> String {
        format_report(&self.errors, &self.artifact_path)
    }

    /// Replacement page body.
    #[must_use]
    pub fn render_page(&self) -> String {
        render_page(&self.checked_text, &self.errors, &self.artifact_path)
    }
}
