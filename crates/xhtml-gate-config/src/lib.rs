//! Shared configuration for the XHTML response gate.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file named with `--config-path`, then `XHTML_GATE_*`
//! environment variables, then command-line flags.

mod artifacts;
mod defaults;
mod logging;
mod tier;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use artifacts::{ArtifactPaths, ArtifactPathsError};
pub use defaults::{
    ARTIFACT_PREFIX, ARTIFACT_SUFFIX, DEFAULT_LOG_FILTER, default_artifact_dir,
    default_deployment_tier, default_log_filter, default_log_filter_string, default_log_format,
    default_markup_checks,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use tier::{DeploymentTier, DeploymentTierParseError, MarkupChecks};

/// Resolved gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "XHTML_GATE")]
pub struct Config {
    /// Tier the application runs in; only development and test are checked.
    #[ortho_config(default = default_deployment_tier())]
    pub deployment_tier: DeploymentTier,
    /// Master switch for markup checking.
    #[ortho_config(default = default_markup_checks())]
    pub markup_checks: MarkupChecks,
    /// Directory receiving failing payloads. Defaults to the temp directory.
    pub artifact_dir: Option<Utf8PathBuf>,
    /// Schema definition replacing the bundled XHTML schema.
    pub schema_path: Option<Utf8PathBuf>,
    /// `tracing` filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deployment_tier: default_deployment_tier(),
            markup_checks: default_markup_checks(),
            artifact_dir: None,
            schema_path: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Deployment tier the gate is running in.
    #[must_use]
    pub const fn deployment_tier(&self) -> DeploymentTier {
        self.deployment_tier
    }

    /// Position of the markup checking master switch.
    #[must_use]
    pub const fn markup_checks(&self) -> MarkupChecks {
        self.markup_checks
    }

    /// Whether markup checking is enabled at all.
    #[must_use]
    pub const fn check_markup(&self) -> bool {
        self.markup_checks.is_enabled()
    }

    /// Returns true when both the tier and the master switch allow checks.
    #[must_use]
    pub const fn gate_enabled(&self) -> bool {
        self.check_markup() && self.deployment_tier.permits_markup_checks()
    }

    /// Configured artifact directory, if any.
    #[must_use]
    pub fn artifact_dir(&self) -> Option<&Utf8Path> {
        self.artifact_dir.as_deref()
    }

    /// Configured schema definition path, if any.
    #[must_use]
    pub fn schema_path(&self) -> Option<&Utf8Path> {
        self.schema_path.as_deref()
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
