//! Shared test doubles.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use xhtml_gate_config::Config;

use crate::bootstrap::BootstrapError;
use crate::diagnostics::{DiagnosticSink, PersistenceError};
use crate::gate::{GateError, GateFailure, SkipReason};
use crate::reporter::GateReporter;

/// Reporter recording the `event` name of every callback.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingReporter {
    fn record(&self, event: &'static str) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl GateReporter for RecordingReporter {
    fn bootstrap_starting(&self) {
        self.record("bootstrap_starting");
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record("bootstrap_succeeded");
    }

    fn bootstrap_failed(&self, _error: &BootstrapError) {
        self.record("bootstrap_failed");
    }

    fn response_skipped(&self, _reason: &SkipReason) {
        self.record("response_skipped");
    }

    fn response_passed(&self) {
        self.record("response_passed");
    }

    fn response_failed(&self, _failure: &GateFailure) {
        self.record("response_failed");
    }

    fn gate_errored(&self, _error: &GateError) {
        self.record("gate_errored");
    }
}

/// Sink that always fails to persist.
#[derive(Debug, Default)]
pub struct FailingSink;

impl DiagnosticSink for FailingSink {
    fn persist(&self, _text: &str) -> Result<PathBuf, PersistenceError> {
        Err(PersistenceError {
            directory: PathBuf::from("/unwritable"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}
