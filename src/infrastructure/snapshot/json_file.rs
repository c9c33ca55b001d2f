//! JSON file snapshot store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::domain::license::KeyMap;
use crate::domain::snapshot::SnapshotStore;
use crate::domain::DomainError;

/// Default snapshot file name
pub const DEFAULT_SNAPSHOT_FILE: &str = "keys.json";

/// Snapshot kept as a single pretty-printed JSON document
///
/// Saves go through a sibling temporary file that is flushed and then renamed
/// over the destination, so readers only ever see a complete document.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot named `file_name` in the directory of the running executable
    ///
    /// Falls back to the working directory when the executable path is unknown.
    pub fn beside_executable(file_name: &str) -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_FILE.to_string());

        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }

    async fn write_temp(&self, temp_path: &Path, raw: &[u8]) -> Result<(), DomainError> {
        let mut file = File::create(temp_path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to create temp snapshot {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(raw).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to write temp snapshot {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to flush temp snapshot {}: {}",
                temp_path.display(),
                e
            ))
        })
    }
}

/// Make a completed rename in `dir` durable
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshot {
    async fn load(&self) -> Result<KeyMap, DomainError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot on disk yet");
                return Ok(KeyMap::new());
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read snapshot {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&raw).map_err(|e| {
            DomainError::storage(format!(
                "Failed to parse snapshot {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, keys: &KeyMap) -> Result<(), DomainError> {
        let raw = serde_json::to_vec_pretty(keys)
            .map_err(|e| DomainError::internal(format!("Failed to serialize keys: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create snapshot directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, &raw).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DomainError::storage(format!(
                "Failed to replace snapshot {}: {}",
                self.path.display(),
                e
            )));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            sync_dir(parent).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to flush snapshot directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        debug!(path = %self.path.display(), keys = keys.len(), "Snapshot saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
