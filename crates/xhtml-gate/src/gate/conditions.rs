//! Entry conditions deciding whether a response is checked at all.

use std::fmt;

use xhtml_gate_config::{Config, DeploymentTier};

/// Status a response must carry to be checked.
pub const CHECKED_STATUS: u16 = 200;

/// Status forced on a response whose markup failed the check.
pub const FAILURE_STATUS: u16 = 400;

/// Content types treated as pages, matched case-insensitively as substrings.
pub const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// Facts about the request that produced a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    xhr: bool,
}

impl RequestContext {
    /// Context for an ordinary page request.
    #[must_use]
    pub const fn page() -> Self {
        Self { xhr: false }
    }

    /// Context for an asynchronous (`XMLHttpRequest`) request.
    #[must_use]
    pub const fn ajax() -> Self {
        Self { xhr: true }
    }

    /// Returns whether the request was asynchronous.
    #[must_use]
    pub const fn is_xhr(&self) -> bool {
        self.xhr
    }
}

/// A rendered response about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    content_type: String,
    body: String,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Creates a `200 text/html` response.
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(CHECKED_STATUS, "text/html; charset=utf-8", body)
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Content type header value.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning its body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns whether the content type names an HTML family type.
    #[must_use]
    pub fn is_html(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        HTML_CONTENT_TYPES
            .iter()
            .any(|candidate| content_type.contains(candidate))
    }
}

/// Why a response was passed through unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Checking is switched off in configuration.
    Disabled,
    /// The deployment tier does not run markup checks.
    Tier(DeploymentTier),
    /// The request was asynchronous.
    Ajax,
    /// The status was not [`CHECKED_STATUS`].
    Status(u16),
    /// The content type is not an HTML family type.
    ContentType(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("markup checks disabled"),
            Self::Tier(tier) => write!(f, "deployment tier '{tier}' is not checked"),
            Self::Ajax => f.write_str("asynchronous request"),
            Self::Status(status) => write!(f, "status {status} is not checked"),
            Self::ContentType(content_type) => {
                write!(f, "content type '{content_type}' is not checked")
            }
        }
    }
}

/// Deployment-level switches for the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    tier: DeploymentTier,
    check_markup: bool,
}

impl GatePolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(tier: DeploymentTier, check_markup: bool) -> Self {
        Self { tier, check_markup }
    }

    /// Reads the policy from configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.deployment_tier(), config.check_markup())
    }

    /// Returns the first entry condition `response` fails, if any.
    #[must_use]
    pub fn skip_reason(&self, context: &RequestContext, response: &Response) -> Option<SkipReason> {
        if !self.check_markup {
            return Some(SkipReason::Disabled);
        }
        if !self.tier.permits_markup_checks() {
            return Some(SkipReason::Tier(self.tier));
        }
        if context.is_xhr() {
            return Some(SkipReason::Ajax);
        }
        if response.status() != CHECKED_STATUS {
            return Some(SkipReason::Status(response.status()));
        }
        if !response.is_html() {
            return Some(SkipReason::ContentType(response.content_type().to_owned()));
        }
        None
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::new(DeploymentTier::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("text/html")]
    #[case("text/html; charset=utf-8")]
    #[case("TEXT/HTML")]
    #[case("application/xhtml+xml")]
    fn html_family_is_recognised(#[case] content_type: &str) {
        assert!(Response::new(200, content_type, "").is_html());
    }

    #[rstest]
    #[case("application/json")]
    #[case("text/plain")]
    #[case("")]
    fn other_types_are_not_html(#[case] content_type: &str) {
        assert!(!Response::new(200, content_type, "").is_html());
    }

    #[rstest]
    #[case(DeploymentTier::Development, None)]
    #[case(DeploymentTier::Test, None)]
    #[case(DeploymentTier::Staging, Some(SkipReason::Tier(DeploymentTier::Staging)))]
    #[case(
        DeploymentTier::Production,
        Some(SkipReason::Tier(DeploymentTier::Production))
    )]
    fn tier_controls_checking(#[case] tier: DeploymentTier, #[case] expected: Option<SkipReason>) {
        let policy = GatePolicy::new(tier, true);
        let reason = policy.skip_reason(&RequestContext::page(), &Response::html("<p/>"));
        assert_eq!(reason, expected);
    }

    #[test]
    fn disabled_switch_wins() {
        let policy = GatePolicy::new(DeploymentTier::Development, false);
        let reason = policy.skip_reason(&RequestContext::page(), &Response::html(""));
        assert_eq!(reason, Some(SkipReason::Disabled));
    }

    #[rstest]
    #[case(RequestContext::ajax(), Response::html(""), SkipReason::Ajax)]
    #[case(
        RequestContext::page(),
        Response::new(404, "text/html", ""),
        SkipReason::Status(404)
    )]
    #[case(
        RequestContext::page(),
        Response::new(200, "application/json", "{}"),
        SkipReason::ContentType("application/json".to_owned())
    )]
    fn request_conditions_skip(
        #[case] context: RequestContext,
        #[case] response: Response,
        #[case] expected: SkipReason,
    ) {
        let reason = GatePolicy::default().skip_reason(&context, &response);
        assert_eq!(reason, Some(expected));
    }

    #[test]
    fn skip_reasons_read_well() {
        assert_eq!(
            SkipReason::Tier(DeploymentTier::Production).to_string(),
            "deployment tier 'production' is not checked"
        );
        assert_eq!(SkipReason::Status(302).to_string(), "status 302 is not checked");
    }
}
