use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while reading a result directory.
///
/// Every plot operation aborts on the first error; no figure is produced.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("missing artifact: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("malformed artifact {}: {reason}", path.display())]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: String,
        expected: String,
        found: String,
    },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        ArtifactError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(
        what: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        ArtifactError::ShapeMismatch {
            what: what.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Map an I/O error on `path`, turning `NotFound` into `MissingArtifact`.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::MissingArtifact {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ArtifactError>;
