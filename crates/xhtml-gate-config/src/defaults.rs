use std::env;

use camino::Utf8PathBuf;

use crate::logging::LogFormat;
use crate::tier::{DeploymentTier, MarkupChecks};

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File name prefix for persisted diagnostic artifacts.
pub const ARTIFACT_PREFIX: &str = "xml";

/// File extension (including the dot) for persisted diagnostic artifacts.
pub const ARTIFACT_SUFFIX: &str = ".xml";

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default deployment tier.
pub fn default_deployment_tier() -> DeploymentTier {
    DeploymentTier::Development
}

/// Markup checking is on unless explicitly disabled.
pub const fn default_markup_checks() -> MarkupChecks {
    MarkupChecks::Enabled
}

/// Directory receiving diagnostic artifacts when none is configured.
///
/// Falls back to the lossy form of the system temporary directory when it is
/// not valid UTF-8.
pub fn default_artifact_dir() -> Utf8PathBuf {
    let temp = env::temp_dir();
    Utf8PathBuf::from_path_buf(temp)
        .unwrap_or_else(|path| Utf8PathBuf::from(path.to_string_lossy().into_owned()))
}
