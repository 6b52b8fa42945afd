//! Text report and replacement page for a failed check.

use std::iter;
use std::path::Path;

use quick_xml::escape::escape;
use xhtml_gate_markup::{LocatedError, XHTML_ROOT_TAG, XHTML_STRICT_DOCTYPE};

/// Content type of the replacement page.
pub const DIAGNOSTIC_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const PAGE_TITLE: &str = "XHTML validation failed";

/// Formats the report: one `[line:column]message` line per error, then the
/// artifact path.
#[must_use]
pub fn format_report(errors: &[LocatedError], artifact_path: &Path) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .chain(iter::once(artifact_path.display().to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the page served in place of a failing response.
///
/// The page lists each report entry, linked to its line, followed by the
/// checked text with numbered lines. All interpolated text is escaped, so
/// the page is itself valid strict XHTML.
#[must_use]
pub fn render_page(checked_text: &str, errors: &[LocatedError], artifact_path: &Path) -> String {
    let mut page = String::new();
    page.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    page.push_str(XHTML_STRICT_DOCTYPE);
    page.push('\n');
    page.push_str(XHTML_ROOT_TAG);
    page.push('\n');
    page.push_str(&format!("<head><title>{PAGE_TITLE}</title></head>\n"));
    page.push_str("<body>\n");
    page.push_str(&format!("<h1>{PAGE_TITLE}</h1>\n"));
    page.push_str(&format!(
        "<p>The checked text was saved to <code>{}</code>.</p>\n",
        escape(artifact_path.display().to_string().as_str())
    ));

    if !errors.is_empty() {
        page.push_str("<ul>\n");
        for error in errors {
            page.push_str(&format!(
                "<li><a href=\"#line-{line}\">[{line}:{column}]</a> {message}</li>\n",
                line = error.line,
                column = error.column,
                message = escape(error.message.as_str()),
            ));
        }
        page.push_str("</ul>\n");
    }

    page.push_str("<pre>");
    for (index, line) in checked_text.lines().enumerate() {
        let number = index.saturating_add(1);
        page.push_str(&format!(
            "\n<span id=\"line-{number}\">{number:>4} </span>{}",
            escape(line)
        ));
    }
    page.push_str("\n</pre>\n</body>\n</html>\n");
    page
}
