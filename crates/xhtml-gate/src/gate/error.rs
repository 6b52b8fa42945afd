//! Error types for the gate.
//!
//! Syntax and schema problems in the checked markup are not errors: they
//! produce a [`GateResult::Failed`](super::GateResult::Failed) outcome and
//! a replacement page. Only operational failures surface here.

use thiserror::Error;

use crate::diagnostics::PersistenceError;

/// Operational failures while gating a response.
#[derive(Debug, Error)]
pub enum GateError {
    /// The failing payload could not be persisted as an artifact.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
