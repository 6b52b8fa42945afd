//! The markup check seam used by the gate.

use std::sync::Arc;

use xhtml_gate_markup::{CheckReport, LocatedError, MarkupChecker};

/// Rewrites and validates a response body.
pub trait MarkupCheck: Send + Sync {
    /// Checks `text`, returning the rewritten text and any errors.
    fn check(&self, text: &str) -> CheckReport;
}

impl MarkupCheck for MarkupChecker {
    fn check(&self, text: &str) -> CheckReport {
        Self::check(self, text)
    }
}

impl<T> MarkupCheck for Arc<T>
where
    T: MarkupCheck + ?Sized,
{
    fn check(&self, text: &str) -> CheckReport {
        (**self).check(text)
    }
}

/// Configurable markup check for testing purposes.
///
/// Returns the input unchanged as the rewritten text together with a fixed
/// list of errors.
#[derive(Debug, Default, Clone)]
pub struct ConfigurableMarkupCheck {
    errors: Vec<LocatedError>,
}

impl ConfigurableMarkupCheck {
    /// Creates a check that always passes.
    #[must_use]
    pub const fn passing() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a check that fails with the specified errors.
    #[must_use]
    pub const fn failing(errors: Vec<LocatedError>) -> Self {
        Self { errors }
    }
}

impl MarkupCheck for ConfigurableMarkupCheck {
    fn check(&self, text: &str) -> CheckReport {
        CheckReport::new(text.to_owned(), 0, self.errors.clone())
    }
}
