use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::repository::StorageError;

fn io_err(path: &Path, e: &std::io::Error) -> StorageError {
    StorageError::Io(format!("{}: {e}", path.display()))
}

/// Read and parse one JSON document.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
        Err(e) => return Err(io_err(path, &e)),
    };
    debug!(path = %path.display(), bytes = bytes.len(), "read json document");
    // Invalid UTF-8 is a parse failure like any other bad content.
    serde_json::from_slice(&bytes)
        .map_err(|e| StorageError::Malformed(format!("{}: {e}", path.display())))
}

/// Serialize `value` and overwrite the file at `path`, creating parent directories.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StorageError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_err(parent, &e))?;
    }

    tokio::fs::write(path, text.as_bytes())
        .await
        .map_err(|e| io_err(path, &e))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote json document");
    Ok(())
}

/// True if something already exists at `path`.
pub(crate) async fn exists(path: &Path) -> Result<bool, StorageError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| io_err(path, &e))
}
