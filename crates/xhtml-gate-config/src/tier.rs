//! Deployment tiers and the gate policy attached to each.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Environment the application is running in.
///
/// Markup checking is a development-time safety net: it runs in the
/// `development` and `test` tiers and never in `staging` or `production`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeploymentTier {
    /// Local development.
    #[default]
    Development,
    /// Automated test runs.
    Test,
    /// Pre-production staging.
    #[strum(to_string = "staging", serialize = "stage")]
    Staging,
    /// Live traffic.
    Production,
}

impl DeploymentTier {
    /// Returns whether responses served in this tier may be checked.
    #[must_use]
    pub const fn permits_markup_checks(self) -> bool {
        matches!(self, Self::Development | Self::Test)
    }
}

/// Errors encountered while parsing a [`DeploymentTier`] from text.
pub type DeploymentTierParseError = strum::ParseError;

/// Master switch for markup checking, independent of the tier.
///
/// Takes an explicit value on the command line (`--markup-checks disabled`)
/// so an absent flag never overrides the file or environment layers.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MarkupChecks {
    /// Checks run in tiers that permit them.
    #[default]
    Enabled,
    /// Checks never run.
    Disabled,
}

impl MarkupChecks {
    /// Returns whether the switch is on.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}
