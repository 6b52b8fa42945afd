//! End-to-end tests for xhtml-gate-markup using insta for snapshot testing.
//!
//! These tests drive the public API the way the gate does: one shared
//! checker, many documents.

use std::sync::Arc;

use insta::{assert_debug_snapshot, assert_snapshot};
use rstest::{fixture, rstest};

use xhtml_gate_markup::{
    ErrorStage, MarkupChecker, MarkupError, RewriteRule, Rewriter, Schema, xhtml_rule_names,
};

#[fixture]
fn checker() -> MarkupChecker {
    let schema = Schema::xhtml().unwrap_or_else(|err| panic!("schema: {err}"));
    MarkupChecker::xhtml(Arc::new(schema)).unwrap_or_else(|err| panic!("checker: {err}"))
}

fn render(errors: &[xhtml_gate_markup::LocatedError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn rule_table_order() {
    assert_debug_snapshot!(xhtml_rule_names().collect::<Vec<_>>(), @r#"
    [
        "line-endings",
        "space-entities",
        "data-attributes",
        "form-hint-attributes",
        "tester-elements",
        "range-inputs",
        "range-bounds",
        "script-src-type",
        "bare-script-type",
        "mark-elements",
        "html5-doctype",
        "html-namespace",
    ]
    "#);
}

#[rstest]
fn html5_fragment_is_rewritten(checker: MarkupChecker) {
    let source = concat!(
        "<!DOCTYPE html>\r\n",
        "<html>\r\n",
        "<body><p data-x=\"1\" id=\"a\">a&nbsp;<mark>b</mark></p><script></script></body>\r\n",
        "</html>"
    );
    let report = checker.check(source);

    assert_eq!(report.num_replacements(), 9);
    assert_snapshot!(report.rewritten(), @r#"
    <!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
    <html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
    <body><p  id="a">a<b>b</b></p><script type="application/javascript"></script></body>
    </html>
    "#);
}

// =============================================================================
// Unhappy Path
// =============================================================================

#[rstest]
fn schema_errors_are_reported_in_document_order(checker: MarkupChecker) {
    let source = concat!(
        "<html>\n",
        "<head><title>t</title></head>\n",
        "<body>\n",
        "<p><blink>x</blink></p>\n",
        "<p><img alt=\"a\"/></p>\n",
        "</body>\n",
        "</html>\n"
    );
    let report = checker.check(source);

    assert!(report.errors().iter().all(|e| e.stage == ErrorStage::Schema));
    assert_snapshot!(render(report.errors()), @r"
    [4:4]element 'blink' is not declared
    [5:4]element 'img' is missing required attribute 'src'
    ");
}

#[rstest]
fn malformed_markup_yields_a_single_syntax_error(checker: MarkupChecker) {
    let report = checker.check("<html>\n<body>\n<p>open\n</body>\n</html>");

    let [error] = report.errors() else {
        panic!("expected exactly one error, got {:?}", report.errors());
    };
    assert_eq!(error.stage, ErrorStage::Syntax);
    assert_eq!(error.line, 4);
}

#[test]
fn invalid_rule_pattern_is_rejected() {
    let error = RewriteRule::new("broken", "(unclosed", "").expect_err("must fail");
    assert!(matches!(error, MarkupError::InvalidPattern { .. }));
    assert!(error.to_string().starts_with("invalid pattern for rule 'broken'"));
}

#[test]
fn replacement_with_unknown_group_is_rejected() {
    let error = RewriteRule::new("dangling", "(a)", "$2").expect_err("must fail");
    assert_snapshot!(
        error.to_string(),
        @"invalid replacement for rule 'dangling': replacement references undefined capture group: $2"
    );
}

#[test]
fn empty_rewriter_leaves_text_alone() {
    let result = Rewriter::new(Vec::new()).rewrite("<p>x</p>");
    assert!(!result.has_changes());
    assert_eq!(result.output(), "<p>x</p>");
}
