//! Workspace-rooted document access
//!
//! Every path the server touches is resolved against an explicit [`Workspace`]
//! root instead of the process working directory. Writes go through a sibling
//! temp file and a rename so a crash mid-write never leaves a half-written
//! module or config behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Default name of the Bernova configuration document
pub const CONFIG_FILE_NAME: &str = "bernova.config.json";

/// Document store error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Underlying filesystem fault
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Document is not valid JSON (or not the expected shape)
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    /// True if the error is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Root directory of a Bernova project plus the name of its config document.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config_file: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root` using the default config file name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), config_file: PathBuf::from(CONFIG_FILE_NAME) }
    }

    /// Override the config document name (relative to the root, or absolute).
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = config_file.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the configuration document
    pub fn config_path(&self) -> PathBuf {
        self.resolve(&self.config_file)
    }

    /// Resolve a path relative to the workspace root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Check whether a document exists
    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }

    /// Read a text document.
    pub async fn read_text(&self, path: impl AsRef<Path>) -> Result<String, StoreError> {
        let path = self.resolve(path);
        fs::read_to_string(&path).await.map_err(|e| StoreError::io(&path, e))
    }

    /// Read a text document, returning `None` if it does not exist.
    pub async fn read_text_opt(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<String>, StoreError> {
        match self.read_text(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Atomically replace a text document, creating parent directories.
    pub async fn write_text(
        &self,
        path: impl AsRef<Path>,
        content: &str,
    ) -> Result<(), StoreError> {
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = temp_sibling(&path);
        fs::write(&tmp, content).await.map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            // Best effort: the rename failure is the error worth reporting.
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&path, e));
        }

        log::debug!("wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Read and deserialize a JSON document.
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<T, StoreError> {
        let path = self.resolve(path);
        let text = self.read_text(&path).await?;
        serde_json::from_str(&text).map_err(|source| StoreError::Json { path, source })
    }

    /// Serialize a value as pretty JSON and write it atomically.
    pub async fn write_json<T: Serialize>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.resolve(path);
        let mut text = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;
        text.push('\n');
        self.write_text(&path, &text).await
    }
}

/// Temp file next to `path` so the final rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}
