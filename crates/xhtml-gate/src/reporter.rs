//! Structured reporting for gate and bootstrap events.

use std::sync::Arc;

use xhtml_gate_config::Config;
use xhtml_gate_markup::ErrorStage;

use crate::bootstrap::BootstrapError;
use crate::gate::{GateError, GateFailure, SkipReason};

const GATE_TARGET: &str = "xhtml_gate::gate";
const BOOTSTRAP_TARGET: &str = "xhtml_gate::bootstrap";

/// Observer trait used to surface gate events to telemetry sinks.
pub trait GateReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when a response is passed through unchecked.
    fn response_skipped(&self, reason: &SkipReason);

    /// Invoked when a response passes the check.
    fn response_passed(&self);

    /// Invoked when a response fails the check and is replaced.
    fn response_failed(&self, failure: &GateFailure);

    /// Invoked when the gate cannot complete.
    fn gate_errored(&self, error: &GateError);
}

impl<T> GateReporter for Arc<T>
where
    T: GateReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn response_skipped(&self, reason: &SkipReason) {
        (**self).response_skipped(reason);
    }

    fn response_passed(&self) {
        (**self).response_passed();
    }

    fn response_failed(&self, failure: &GateFailure) {
        (**self).response_failed(failure);
    }

    fn gate_errored(&self, error: &GateError) {
        (**self).gate_errored(error);
    }
}

/// Default reporter that records events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredGateReporter;

impl StructuredGateReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GateReporter for StructuredGateReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: BOOTSTRAP_TARGET,
            event = "bootstrap_starting",
            "starting gate bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: BOOTSTRAP_TARGET,
            event = "bootstrap_succeeded",
            deployment_tier = %config.deployment_tier(),
            check_markup = config.check_markup(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "gate bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: BOOTSTRAP_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "gate bootstrap failed"
        );
    }

    fn response_skipped(&self, reason: &SkipReason) {
        tracing::debug!(
            target: GATE_TARGET,
            event = "response_skipped",
            reason = %reason,
            "response not checked"
        );
    }

    fn response_passed(&self) {
        tracing::debug!(
            target: GATE_TARGET,
            event = "response_passed",
            "response markup is valid"
        );
    }

    fn response_failed(&self, failure: &GateFailure) {
        let syntax_errors = failure
            .errors()
            .iter()
            .filter(|error| error.stage == ErrorStage::Syntax)
            .count();
        let schema_errors = failure.errors().len().saturating_sub(syntax_errors);
        tracing::warn!(
            target: GATE_TARGET,
            event = "response_failed",
            syntax_errors,
            schema_errors,
            artifact = %failure.artifact_path().display(),
            "response markup is invalid; serving diagnostic page"
        );
        tracing::debug!(
            target: GATE_TARGET,
            event = "response_failed_report",
            report = %failure.report(),
            "diagnostic report"
        );
    }

    fn gate_errored(&self, error: &GateError) {
        tracing::error!(
            target: GATE_TARGET,
            event = "gate_errored",
            error = %error,
            "gate could not complete"
        );
    }
}
