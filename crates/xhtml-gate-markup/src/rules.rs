//! The fixed HTML5-to-XHTML rewrite rule table.
//!
//! Rendered pages use a handful of HTML5 constructs the strict schema does
//! not know. These rules bridge the gap at check time only; the served
//! response is never rewritten. Order matters: the doctype rewrite runs
//! before the namespace injection on the `<html>` tag that follows it.

use crate::error::MarkupError;
use crate::rewriter::{RewriteRule, Rewriter};

/// XHTML namespace injected on the root element.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Public identifier of the XHTML 1.0 Strict DTD.
pub const XHTML_STRICT_PUBLIC_ID: &str = "-//W3C//DTD XHTML 1.0 Strict//EN";

/// System identifier of the XHTML 1.0 Strict DTD.
pub const XHTML_STRICT_SYSTEM_ID: &str = "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd";

/// Doctype declaration substituted for the HTML5 one.
pub const XHTML_STRICT_DOCTYPE: &str = concat!(
    "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" ",
    "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">"
);

/// Root start tag substituted for a bare `<html>`.
pub const XHTML_ROOT_TAG: &str =
    "<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"en\" lang=\"en\">";

/// MIME type injected on script elements.
pub const SCRIPT_TYPE: &str = "application/javascript";

/// `(name, pattern, replacement)` in application order.
const XHTML_RULES: &[(&str, &str, &str)] = &[
    ("line-endings", r"\r\n?", "\n"),
    ("space-entities", r"&[^;]*sp;", ""),
    ("data-attributes", r#" data-\S+="[^"]*""#, " "),
    (
        "form-hint-attributes",
        r#" (?:autocomplete|placeholder|required)="[^"]*""#,
        " ",
    ),
    (
        "tester-elements",
        r"(?s)<tester\b[^>]*?(?:/>|>.*?</tester>)",
        " ",
    ),
    ("range-inputs", r#" type="range""#, r#" type="text""#),
    ("range-bounds", r#" (?:min|max)="[^"]*""#, " "),
    (
        "script-src-type",
        r#"(<script src="[^"]*")>"#,
        r#"$1 type="application/javascript">"#,
    ),
    (
        "bare-script-type",
        r"<script>",
        r#"<script type="application/javascript">"#,
    ),
    ("mark-elements", r"(?s)<mark>(.*?)</mark>", "<b>$1</b>"),
    ("html5-doctype", r"(?i)<!DOCTYPE html>", XHTML_STRICT_DOCTYPE),
    ("html-namespace", r"<html>", XHTML_ROOT_TAG),
];

/// Names of the XHTML rules in application order.
pub fn xhtml_rule_names() -> impl Iterator<Item = &'static str> {
    XHTML_RULES.iter().map(|(name, _, _)| *name)
}

impl Rewriter {
    /// Builds the rewriter for the HTML5-to-XHTML rule table.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule in the table fails to compile.
    pub fn xhtml() -> Result<Self, MarkupError> {
        let rules = XHTML_RULES
            .iter()
            .map(|(name, pattern, replacement)| RewriteRule::new(*name, pattern, *replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }
}
