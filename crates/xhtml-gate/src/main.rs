//! Command-line front end for the XHTML response gate.
//!
//! Reads a rendered page from stdin, gates it as a `200 text/html` page
//! response and writes the resulting body to stdout.

use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use xhtml_gate::{
    RequestContext, Response, StructuredGateReporter, SystemConfigLoader, bootstrap_with,
};

const EXIT_REPLACED: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let gate = match bootstrap_with(&SystemConfigLoader, Arc::new(StructuredGateReporter::new())) {
        Ok(gate) => gate,
        Err(error) => return fail(&error),
    };

    let mut body = String::new();
    if let Err(error) = io::stdin().read_to_string(&mut body) {
        return fail(&error);
    }

    let controller = gate.controller();
    let response = Response::html(body);
    let result = match controller.check(&RequestContext::page(), &response) {
        Ok(result) => result,
        Err(error) => return fail(&error),
    };
    let replaced = result.replaces_response();
    let body = result.apply_to(response).into_body();

    let mut stdout = io::stdout().lock();
    if let Err(error) = stdout
        .write_all(body.as_bytes())
        .and_then(|()| stdout.flush())
    {
        return fail(&error);
    }

    if replaced {
        ExitCode::from(EXIT_REPLACED)
    } else {
        ExitCode::SUCCESS
    }
}

fn fail(error: &dyn std::error::Error) -> ExitCode {
    // Telemetry may not be installed yet, so report directly.
    io::stderr()
        .write_all(format!("xhtml-gate: {error}\n").as_bytes())
        .unwrap_or_default();
    ExitCode::from(EXIT_FAILURE)
}
