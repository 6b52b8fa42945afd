//! Resolves where diagnostic artifacts are written.
//!
//! Artifacts are evidence of a failed check. The directory is created on
//! demand and nothing in the gate ever removes files from it.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Config;
use crate::defaults::{ARTIFACT_PREFIX, ARTIFACT_SUFFIX, default_artifact_dir};

/// Location and naming of persisted failing payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    directory: PathBuf,
    prefix: &'static str,
    suffix: &'static str,
}

impl ArtifactPaths {
    /// Derives artifact paths from the configuration, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactPathsError::Directory`] when the directory cannot
    /// be created.
    pub fn from_config(config: &Config) -> Result<Self, ArtifactPathsError> {
        let directory = config
            .artifact_dir()
            .map_or_else(default_artifact_dir, |dir| dir.to_path_buf())
            .into_std_path_buf();
        Self::in_directory(directory)
    }

    /// Uses an explicit directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactPathsError::Directory`] when the directory cannot
    /// be created.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Result<Self, ArtifactPathsError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| ArtifactPathsError::Directory {
            path: directory.clone(),
            source,
        })?;
        Ok(Self {
            directory,
            prefix: ARTIFACT_PREFIX,
            suffix: ARTIFACT_SUFFIX,
        })
    }

    /// Directory holding artifacts.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    /// File name prefix for artifacts.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// File name suffix (extension) for artifacts.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        self.suffix
    }
}

/// Errors raised while preparing the artifact directory.
#[derive(Debug, Error)]
pub enum ArtifactPathsError {
    /// Creating the artifact directory failed.
    #[error("failed to prepare artifact directory '{}': {source}", path.display())]
    Directory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}
