//! Test suites for the XHTML response gate.

mod support;
mod unit;
