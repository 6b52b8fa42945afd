//! The response gate.
//!
//! A response is checked only when every entry condition holds (see
//! [`GatePolicy::skip_reason`]). A checked response either passes untouched
//! or fails: the rewritten text is persisted, and the body is replaced by a
//! diagnostic page served with status 400. The original body is never
//! rewritten in place.

mod check;
mod conditions;
mod controller;
mod error;
mod outcome;

pub use check::{ConfigurableMarkupCheck, MarkupCheck};
pub use conditions::{
    CHECKED_STATUS, FAILURE_STATUS, GatePolicy, HTML_CONTENT_TYPES, RequestContext, Response,
    SkipReason,
};
pub use controller::GateController;
pub use error::GateError;
pub use outcome::{GateFailure, GateResult};
