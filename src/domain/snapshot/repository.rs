//! Snapshot store trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::license::KeyMap;
use crate::domain::DomainError;

/// Durable home of the full key mapping
///
/// The mapping is always loaded and saved as a whole; there is no
/// incremental format.
#[async_trait]
pub trait SnapshotStore: Send + Sync + Debug {
    /// Read the persisted mapping
    ///
    /// A store that has never been written yields an empty map. Unreadable or
    /// malformed content is an error.
    async fn load(&self) -> Result<KeyMap, DomainError>;

    /// Replace the persisted mapping with `keys`
    ///
    /// On error the previously persisted content must still be intact.
    async fn save(&self, keys: &KeyMap) -> Result<(), DomainError>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}
