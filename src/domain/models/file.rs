use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A file as reported by the backend listing. The client only ever holds a
/// read-only, possibly stale copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_id: String,
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size_bytes: u64,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// The backend sends `null` for columns it never filled in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl LocalFile {
    pub fn new(path: PathBuf, file_name: String, mime_type: String, size_bytes: u64) -> Self {
        Self {
            path,
            file_name,
            mime_type,
            size_bytes,
        }
    }

    /// Builds a `LocalFile` from a path on disk, guessing the mime type from
    /// the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;

        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no usable file name", path.display()),
                )
            })?;

        let mime_type = mime_guess::from_path(&path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        Ok(Self::new(path, file_name, mime_type, metadata.len()))
    }
}
