//! In-memory snapshot store

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::license::KeyMap;
use crate::domain::snapshot::SnapshotStore;
use crate::domain::DomainError;

/// Snapshot store that keeps the last saved mapping in memory
///
/// Useful for testing and development. Data is lost when the process terminates.
/// Loads and saves can be switched to fail independently.
#[derive(Debug, Default)]
pub struct InMemorySnapshot {
    keys: RwLock<KeyMap>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl InMemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot pre-populated with `keys`
    pub fn with_keys(keys: KeyMap) -> Self {
        Self {
            keys: RwLock::new(keys),
            ..Self::default()
        }
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the currently persisted mapping
    pub async fn persisted(&self) -> KeyMap {
        self.keys.read().await.clone()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshot {
    async fn load(&self) -> Result<KeyMap, DomainError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory snapshot configured to fail loads"));
        }

        Ok(self.keys.read().await.clone())
    }

    async fn save(&self, keys: &KeyMap) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory snapshot configured to fail saves"));
        }

        *self.keys.write().await = keys.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
