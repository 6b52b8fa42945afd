//! Persisting checked text as uniquely named artifact files.

use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::Builder;
use thiserror::Error;
use xhtml_gate_config::ArtifactPaths;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Failure to write an artifact.
#[derive(Debug, Error)]
#[error("failed to persist artifact in {}: {source}", directory.display())]
pub struct PersistenceError {
    /// Directory the artifact was to be created in.
    pub directory: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}

/// Destination for failing payloads.
pub trait DiagnosticSink: Send + Sync {
    /// Writes `text` to a new artifact and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the artifact cannot be created,
    /// written or kept.
    fn persist(&self, text: &str) -> Result<PathBuf, PersistenceError>;
}

/// Sink writing each payload to a fresh file in the artifact directory.
///
/// Names are drawn by `tempfile`, so concurrent persists never collide.
/// Files are kept after the call returns; nothing here deletes them.
#[derive(Debug, Clone)]
pub struct TempFileSink {
    paths: ArtifactPaths,
}

impl TempFileSink {
    /// Creates a sink writing under `paths`.
    #[must_use]
    pub const fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    /// Artifact location and naming.
    #[must_use]
    pub const fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    fn write(&self, text: &str) -> io::Result<PathBuf> {
        let mut builder = Builder::new();
        builder.prefix(self.paths.prefix()).suffix(self.paths.suffix());
        #[cfg(unix)]
        {
            use std::fs::Permissions;
            builder.permissions(Permissions::from_mode(0o600));
        }

        let mut file = builder.tempfile_in(self.paths.directory())?;
        file.write_all(text.as_bytes())?;
        file.as_file().sync_all()?;
        let (_, path) = file.keep().map_err(|error| error.error)?;
        Ok(path)
    }
}

impl DiagnosticSink for TempFileSink {
    fn persist(&self, text: &str) -> Result<PathBuf, PersistenceError> {
        self.write(text).map_err(|source| PersistenceError {
            directory: self.paths.directory().to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Arc;
    use std::thread;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn artifact_dir() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn sink_in(dir: &TempDir) -> TempFileSink {
        TempFileSink::new(ArtifactPaths::in_directory(dir.path()).expect("artifact paths"))
    }

    #[rstest]
    fn persists_exact_bytes(artifact_dir: TempDir) {
        let sink = sink_in(&artifact_dir);
        let text = "<html>\n<body>caf\u{e9} &amp; \u{2603}</body>\n</html>";

        let path = sink.persist(text).expect("persist");

        assert_eq!(fs::read(&path).expect("read"), text.as_bytes());
        assert!(path.starts_with(artifact_dir.path()));
    }

    #[rstest]
    fn names_use_prefix_and_suffix(artifact_dir: TempDir) {
        let path = sink_in(&artifact_dir).persist("x").expect("persist");
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name");

        assert!(name.starts_with("xml"), "name: {name}");
        assert!(name.ends_with(".xml"), "name: {name}");
    }

    #[rstest]
    fn concurrent_persists_produce_distinct_paths(artifact_dir: TempDir) {
        let sink = Arc::new(sink_in(&artifact_dir));
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || sink.persist(&format!("payload {i}")).expect("persist"))
            })
            .collect();

        let paths: HashSet<PathBuf> = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect();
        assert_eq!(paths.len(), 16);
    }

    #[rstest]
    fn missing_directory_is_a_persistence_error(artifact_dir: TempDir) {
        let sink = sink_in(&artifact_dir);
        let directory = sink.paths().directory().to_path_buf();
        fs::remove_dir_all(&directory).expect("remove dir");

        let error = sink.persist("x").expect_err("must fail");
        assert_eq!(error.directory, directory);
    }
}
