//! Gate controller: decides, checks and replaces.

use std::sync::Arc;

use super::check::MarkupCheck;
use super::conditions::{GatePolicy, RequestContext, Response};
use super::error::GateError;
use super::outcome::{GateFailure, GateResult};
use crate::diagnostics::DiagnosticSink;
use crate::reporter::GateReporter;

/// Checks rendered responses and replaces invalid ones.
///
/// Every collaborator is shared, so one controller can serve concurrent
/// requests; each call works only on its own response.
#[derive(Clone)]
pub struct GateController {
    policy: GatePolicy,
    checker: Arc<dyn MarkupCheck>,
    sink: Arc<dyn DiagnosticSink>,
    reporter: Arc<dyn GateReporter>,
}

impl GateController {
    /// Creates a controller from its collaborators.
    #[must_use]
    pub fn new(
        policy: GatePolicy,
        checker: Arc<dyn MarkupCheck>,
        sink: Arc<dyn DiagnosticSink>,
        reporter: Arc<dyn GateReporter>,
    ) -> Self {
        Self {
            policy,
            checker,
            sink,
            reporter,
        }
    }

    /// Decides the outcome for `response` without modifying it.
    ///
    /// A failing body is persisted before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Persistence`] when the failing body cannot be
    /// written to the artifact directory.
    pub fn check(
        &self,
        context: &RequestContext,
        response: &Response,
    ) -> Result<GateResult, GateError> {
        if let Some(reason) = self.policy.skip_reason(context, response) {
            self.reporter.response_skipped(&reason);
            return Ok(GateResult::Skipped(reason));
        }

        let report = self.checker.check(response.body());
        if report.is_valid() {
            self.reporter.response_passed();
            return Ok(GateResult::Passed);
        }

        let artifact_path = match self.sink.persist(report.rewritten()) {
            Ok(path) => path,
            Err(source) => {
                let error = GateError::from(source);
                self.reporter.gate_errored(&error);
                return Err(error);
            }
        };

        let checked_text = report.rewritten().to_owned();
        let failure = GateFailure::new(report.into_errors(), artifact_path, checked_text);
        self.reporter.response_failed(&failure);
        Ok(GateResult::Failed(failure))
    }

    /// Returns the response to send: the original, or the diagnostic page
    /// with status 400 when the markup failed.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Persistence`] when the failing body cannot be
    /// written to the artifact directory.
    pub fn apply(
        &self,
        context: &RequestContext,
        response: Response,
    ) -> Result<Response, GateError> {
        let result = self.check(context, &response)?;
        Ok(result.apply_to(response))
    }
}

impl std::fmt::Debug for GateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateController")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
