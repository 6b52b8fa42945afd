//! XHTML response gate.
//!
//! The gate sits after page rendering. For each response that is an
//! ordinary `200` HTML page served in a development or test tier, it runs
//! the markup pipeline from [`xhtml_gate_markup`]: rewrite HTML5 constructs,
//! parse strictly, validate against the strict XHTML schema. Valid pages
//! pass through untouched. Invalid pages are persisted as artifacts and
//! replaced by a diagnostic page served with status 400, so markup
//! regressions surface during development instead of in production.
//!
//! Start-up follows the same sequence as every long-lived component in
//! this workspace: load layered configuration from [`xhtml_gate_config`],
//! install structured telemetry, compile the schema once and share it, and
//! report each step through a [`GateReporter`].

mod bootstrap;
pub mod diagnostics;
pub mod gate;
mod reporter;
mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Gate, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
    load_schema,
};
pub use gate::{GateController, GateError, GateResult, RequestContext, Response};
pub use reporter::{GateReporter, StructuredGateReporter};
pub use telemetry::{TelemetryError, TelemetryHandle, initialise as initialise_telemetry};

#[cfg(test)]
mod tests;
