use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Snapshot I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize snapshot {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// True if the snapshot file simply does not exist yet.
    ///
    /// A missing file means the fetch job for that sport has not run, which
    /// callers treat as "no data" rather than a failure.
    pub fn is_missing(&self) -> bool {
        matches!(self, SnapshotError::Missing(_))
    }

    /// Path of the snapshot this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            SnapshotError::Missing(path) => path,
            SnapshotError::Io { path, .. }
            | SnapshotError::Parse { path, .. }
            | SnapshotError::Serialize { path, .. } => path,
        }
    }
}
