//! Unit tests for the gate controller and bootstrap.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use xhtml_gate_config::{ArtifactPaths, Config, DeploymentTier};
use xhtml_gate_markup::{ErrorStage, LocatedError, MarkupChecker, Schema};

use super::support::{FailingSink, RecordingReporter};
use crate::diagnostics::{DIAGNOSTIC_CONTENT_TYPE, TempFileSink};
use crate::gate::{
    ConfigurableMarkupCheck, FAILURE_STATUS, GateController, GateError, GatePolicy, GateResult,
    MarkupCheck, RequestContext, Response, SkipReason,
};
use crate::{BootstrapError, StaticConfigLoader, bootstrap_with};

const VALID_PAGE: &str = concat!(
    "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n",
    "<head><title>ok</title></head>\n",
    "<body><p>fine</p></body>\n",
    "</html>\n"
);

struct Fixture {
    artifacts: TempDir,
    reporter: Arc<RecordingReporter>,
}

impl Fixture {
    fn controller(&self, checker: Arc<dyn MarkupCheck>) -> GateController {
        let paths = ArtifactPaths::in_directory(self.artifacts.path()).expect("artifact paths");
        GateController::new(
            GatePolicy::new(DeploymentTier::Development, true),
            checker,
            Arc::new(TempFileSink::new(paths)),
            self.reporter.clone(),
        )
    }

    fn artifact_count(&self) -> usize {
        fs::read_dir(self.artifacts.path())
            .expect("read dir")
            .count()
    }
}

#[fixture]
fn fixture() -> Fixture {
    Fixture {
        artifacts: TempDir::new().expect("temp dir"),
        reporter: Arc::new(RecordingReporter::default()),
    }
}

fn xhtml_checker() -> Arc<dyn MarkupCheck> {
    let schema = Arc::new(Schema::xhtml().expect("schema"));
    Arc::new(MarkupChecker::xhtml(schema).expect("checker"))
}

// =============================================================================
// Controller
// =============================================================================

#[rstest]
fn passing_check_leaves_response_alone(fixture: Fixture) {
    let controller = fixture.controller(Arc::new(ConfigurableMarkupCheck::passing()));
    let response = Response::html("<anything/>");

    let output = controller
        .apply(&RequestContext::page(), response.clone())
        .expect("apply");

    assert_eq!(output, response);
    assert_eq!(fixture.artifact_count(), 0);
    assert_eq!(fixture.reporter.events(), vec!["response_passed"]);
}

#[rstest]
fn failing_check_persists_and_replaces(fixture: Fixture) {
    let errors = vec![LocatedError::schema(1, 1, "element 'x' is not declared")];
    let controller = fixture.controller(Arc::new(ConfigurableMarkupCheck::failing(errors)));
    let response = Response::html("<x/>");

    let result = controller
        .check(&RequestContext::page(), &response)
        .expect("check");
    let failure = result.failure().expect("failure");
    assert_eq!(fs::read_to_string(failure.artifact_path()).expect("read"), "<x/>");

    let output = result.apply_to(response);
    assert_eq!(output.status(), FAILURE_STATUS);
    assert_eq!(output.content_type(), DIAGNOSTIC_CONTENT_TYPE);
    assert!(output.body().contains("element &apos;x&apos; is not declared")
        || output.body().contains("element 'x' is not declared"));
    assert_eq!(fixture.reporter.events(), vec!["response_failed"]);
}

#[rstest]
fn skipped_responses_are_not_checked(fixture: Fixture) {
    let errors = vec![LocatedError::syntax(1, 1, "never reported")];
    let controller = fixture.controller(Arc::new(ConfigurableMarkupCheck::failing(errors)));

    let result = controller
        .check(&RequestContext::ajax(), &Response::html("<broken"))
        .expect("check");

    assert_eq!(result, GateResult::Skipped(SkipReason::Ajax));
    assert_eq!(fixture.artifact_count(), 0);
    assert_eq!(fixture.reporter.events(), vec!["response_skipped"]);
}

#[test]
fn persistence_failure_is_an_error() {
    let reporter = Arc::new(RecordingReporter::default());
    let controller = GateController::new(
        GatePolicy::default(),
        Arc::new(ConfigurableMarkupCheck::failing(vec![LocatedError::syntax(
            1, 1, "bad",
        )])),
        Arc::new(FailingSink),
        reporter.clone(),
    );

    let error = controller
        .apply(&RequestContext::page(), Response::html("<bad"))
        .expect_err("must fail");

    assert!(matches!(error, GateError::Persistence(_)));
    assert_eq!(reporter.events(), vec!["gate_errored"]);
}

#[rstest]
fn real_checker_reports_both_stages_separately(fixture: Fixture) {
    let controller = fixture.controller(xhtml_checker());

    let syntax = controller
        .check(&RequestContext::page(), &Response::html("<html>\n<body>\n</p>"))
        .expect("check");
    let schema = controller
        .check(
            &RequestContext::page(),
            &Response::html(VALID_PAGE.replace("<p>fine</p>", "<p><blink/></p>")),
        )
        .expect("check");

    let stages = |result: &GateResult| -> Vec<ErrorStage> {
        result
            .failure()
            .map(|failure| failure.errors().iter().map(|e| e.stage).collect())
            .unwrap_or_default()
    };
    assert_eq!(stages(&syntax), vec![ErrorStage::Syntax]);
    assert_eq!(stages(&schema), vec![ErrorStage::Schema]);
}

#[rstest]
fn valid_page_passes_real_checker(fixture: Fixture) {
    let controller = fixture.controller(xhtml_checker());
    let result = controller
        .check(&RequestContext::page(), &Response::html(VALID_PAGE))
        .expect("check");
    assert_eq!(result, GateResult::Passed);
}

#[rstest]
fn concurrent_failures_get_distinct_artifacts(fixture: Fixture) {
    let controller = Arc::new(fixture.controller(xhtml_checker()));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                let body = format!("<html><body><p>{i}</div></body></html>");
                let result = controller
                    .check(&RequestContext::page(), &Response::html(body))
                    .expect("check");
                let failure = result.failure().expect("failure");
                let text = fs::read_to_string(failure.artifact_path()).expect("read");
                assert!(text.contains(&format!("<p>{i}</div>")));
                failure.artifact_path().to_path_buf()
            })
        })
        .collect();

    let paths: HashSet<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();
    assert_eq!(paths.len(), 8);
    assert_eq!(fixture.artifact_count(), 8);
}

// =============================================================================
// Bootstrap
// =============================================================================

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).expect("utf-8 path")
}

#[test]
fn bootstrap_builds_a_working_gate() {
    let artifacts = TempDir::new().expect("temp dir");
    let config = Config {
        artifact_dir: Some(utf8(artifacts.path().join("nested"))),
        deployment_tier: DeploymentTier::Test,
        ..Config::default()
    };
    let reporter = Arc::new(RecordingReporter::default());

    let gate = bootstrap_with(&StaticConfigLoader::new(config), reporter.clone())
        .expect("bootstrap");

    assert!(artifacts.path().join("nested").is_dir());
    assert_eq!(gate.config().deployment_tier(), DeploymentTier::Test);
    assert_eq!(
        reporter.events(),
        vec!["bootstrap_starting", "bootstrap_succeeded"]
    );
    let result = gate
        .controller()
        .check(&RequestContext::page(), &Response::html(VALID_PAGE))
        .expect("check");
    assert_eq!(result, GateResult::Passed);
}

#[test]
fn bootstrap_reports_unreadable_schema() {
    let dir = TempDir::new().expect("temp dir");
    let config = Config {
        schema_path: Some(utf8(dir.path().join("missing.json"))),
        artifact_dir: Some(utf8(dir.path().to_path_buf())),
        ..Config::default()
    };
    let reporter = Arc::new(RecordingReporter::default());

    let error = bootstrap_with(&StaticConfigLoader::new(config), reporter.clone())
        .expect_err("must fail");

    assert!(matches!(error, BootstrapError::Schema { path: Some(_), .. }));
    assert!(error.to_string().contains("missing.json"));
    assert_eq!(reporter.events(), vec!["bootstrap_starting", "bootstrap_failed"]);
}

#[test]
fn bootstrap_uses_configured_schema() {
    let dir = TempDir::new().expect("temp dir");
    let schema_path = dir.path().join("tiny.json");
    fs::write(
        &schema_path,
        r#"{"name": "tiny", "namespace": "http://www.w3.org/1999/xhtml", "root": "html",
            "elements": {"html": {"attributes": ["lang", "xml:lang"], "content": {"kind": "text"}}}}"#,
    )
    .expect("write schema");
    let config = Config {
        schema_path: Some(utf8(schema_path)),
        artifact_dir: Some(utf8(dir.path().to_path_buf())),
        ..Config::default()
    };

    let gate = bootstrap_with(
        &StaticConfigLoader::new(config),
        Arc::new(RecordingReporter::default()),
    )
    .expect("bootstrap");

    let result = gate
        .controller()
        .check(&RequestContext::page(), &Response::html("<html>just text</html>"))
        .expect("check");
    assert_eq!(result, GateResult::Passed);
}
