//! Gate bootstrap orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use xhtml_gate_config::{ArtifactPaths, ArtifactPathsError, Config};
use xhtml_gate_markup::{MarkupChecker, MarkupError, Schema};

use crate::diagnostics::TempFileSink;
use crate::gate::{GateController, GatePolicy};
use crate::reporter::GateReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the gate configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader error when no configuration can be produced.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an existing configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The schema could not be loaded or compiled.
    #[error("failed to load schema {}: {source}", describe_schema(path.as_ref()))]
    Schema {
        /// Configured schema file, or `None` for the bundled schema.
        path: Option<PathBuf>,
        /// Underlying markup error.
        #[source]
        source: MarkupError,
    },
    /// The rewrite rule table failed to compile.
    #[error("failed to compile rewrite rules: {source}")]
    Rules {
        /// Underlying markup error.
        #[source]
        source: MarkupError,
    },
    /// The artifact directory could not be prepared.
    #[error("failed to prepare artifact directory: {source}")]
    Artifacts {
        /// Underlying filesystem error.
        #[source]
        source: ArtifactPathsError,
    },
}

fn describe_schema(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "(bundled)".to_owned(), |path| path.display().to_string())
}

/// Result of a successful bootstrap invocation.
#[derive(Debug)]
pub struct Gate {
    config: Config,
    controller: GateController,
    telemetry: TelemetryHandle,
}

impl Gate {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the ready controller.
    #[must_use]
    pub const fn controller(&self) -> &GateController {
        &self.controller
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Compiles the configured schema, or the bundled one when none is set.
///
/// # Errors
///
/// Returns [`BootstrapError::Schema`] when the schema cannot be read or
/// compiled.
pub fn load_schema(config: &Config) -> Result<Schema, BootstrapError> {
    match config.schema_path() {
        Some(path) => Schema::from_path(path.as_std_path()).map_err(|source| {
            BootstrapError::Schema {
                path: Some(path.as_std_path().to_path_buf()),
                source,
            }
        }),
        None => Schema::xhtml().map_err(|source| BootstrapError::Schema { path: None, source }),
    }
}

/// Bootstraps the gate using the supplied collaborators.
///
/// Loads configuration, installs telemetry, compiles the schema once and
/// prepares the artifact directory.
///
/// # Errors
///
/// Returns the first [`BootstrapError`] encountered; the reporter is told
/// about it before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn GateReporter>,
) -> Result<Gate, BootstrapError> {
    reporter.bootstrap_starting();
    match build(loader, Arc::clone(&reporter)) {
        Ok(gate) => {
            reporter.bootstrap_succeeded(&gate.config);
            Ok(gate)
        }
        Err(error) => {
            reporter.bootstrap_failed(&error);
            Err(error)
        }
    }
}

fn build(loader: &dyn ConfigLoader, reporter: Arc<dyn GateReporter>) -> Result<Gate, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let schema = Arc::new(load_schema(&config)?);
    let checker =
        MarkupChecker::xhtml(schema).map_err(|source| BootstrapError::Rules { source })?;
    let paths =
        ArtifactPaths::from_config(&config).map_err(|source| BootstrapError::Artifacts { source })?;

    let controller = GateController::new(
        GatePolicy::from_config(&config),
        Arc::new(checker),
        Arc::new(TempFileSink::new(paths)),
        reporter,
    );

    Ok(Gate {
        config,
        controller,
        telemetry,
    })
}
