//! Reading and writing flat JSON snapshot files.

use crate::error::SnapshotError;
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

/// Load and deserialize a JSON snapshot.
///
/// A path that does not exist yields [`SnapshotError::Missing`] so callers can
/// tell "fetch job never ran" apart from a corrupt file.
pub fn load<T>(path: impl AsRef<Path>) -> Result<T, SnapshotError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(SnapshotError::Missing(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = serde_json::from_str(&contents).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(?path, bytes = contents.len(), "Snapshot loaded");
    Ok(snapshot)
}

/// Serialize a value as pretty-printed JSON and write it to `path`.
///
/// The parent directory is created if needed.
pub fn write<T>(path: impl AsRef<Path>, value: &T) -> Result<(), SnapshotError>
where
    T: Serialize,
{
    let path = path.as_ref();
    let io_error = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| SnapshotError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, json).map_err(io_error)?;

    debug!(?path, "Snapshot written");
    Ok(())
}
