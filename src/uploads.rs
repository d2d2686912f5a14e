//! Storage for files attached to posts.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid upload file name: {0:?}")]
    InvalidName(String),
    #[error("failed to create upload directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write upload {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes uploaded files into a directory served over HTTP.
///
/// Files keep the name the client sent (reduced to its final path component).
/// A second upload with the same name replaces the first.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStore {
    /// Create an upload store writing to `dir`, whose files are reachable
    /// under `url_prefix` (e.g. `/uploads`).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        self.create_dir().await?;
        info!(dir = %self.dir.display(), "Upload directory ready");
        Ok(())
    }

    async fn create_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Store `bytes` under `filename` and return the URL it is served at.
    ///
    /// # Errors
    ///
    /// Returns an error if the name has no usable final component or the
    /// file cannot be written.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let name = sanitize_filename(filename)?;
        self.create_dir().await?;

        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), size = bytes.len(), "Upload stored");
        Ok(self.url_for(name))
    }

    /// Public URL of a stored file.
    #[must_use]
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, urlencoding::encode(name))
    }
}

/// Reduce a client-supplied file name to its final path component.
///
/// Both `/` and `\` are treated as separators since browsers on Windows may
/// send full paths.
fn sanitize_filename(filename: &str) -> Result<&str, UploadError> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return Err(UploadError::InvalidName(filename.to_string()));
    }
    Ok(name)
}
