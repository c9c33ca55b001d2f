//! Key store
//!
//! Owns the key mapping and enforces the key lifecycle:
//! issue -> (bind on first login) -> (reset) -> delete.
//! Every operation runs under one lock for its whole read-modify-persist
//! sequence, and memory only changes after the snapshot write succeeded.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::license::{
    validate_hwid, validate_issue_request, IssuedKey, KeyDuration, KeyEntry, KeyMap, KeyRecord,
    LoginOutcome,
};
use crate::domain::{Clock, DomainError, SnapshotStore, SystemClock};

use super::generator::KeyGenerator;

/// Shortened key for log lines
fn key_hint(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}****", prefix)
}

/// Process-wide store of issued API keys
#[derive(Debug)]
pub struct KeyStore {
    keys: Mutex<KeyMap>,
    snapshot: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    generator: KeyGenerator,
}

impl KeyStore {
    /// Open the store from its snapshot
    ///
    /// A snapshot that cannot be read or parsed is logged and replaced by an
    /// empty store; startup never fails because of it.
    pub async fn open(snapshot: Arc<dyn SnapshotStore>) -> Self {
        let mut keys = match snapshot.load().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(
                    location = %snapshot.location(),
                    error = %e,
                    "Failed to load key snapshot, starting with an empty store"
                );
                KeyMap::new()
            }
        };

        let before = keys.len();
        keys.retain(|_, record| !record.username().is_empty());
        if keys.len() != before {
            warn!(
                dropped = before - keys.len(),
                "Ignoring snapshot records without a username"
            );
        }

        info!(
            location = %snapshot.location(),
            keys = keys.len(),
            "Key store opened"
        );

        Self {
            keys: Mutex::new(keys),
            snapshot,
            clock: Arc::new(SystemClock),
            generator: KeyGenerator::new(),
        }
    }

    /// Use a custom time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom key generator
    pub fn with_generator(mut self, generator: KeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Issue a new key for `username`, valid for `time` (`lifetime` or `<n><unit>`)
    pub async fn issue(&self, username: &str, time: &str) -> Result<IssuedKey, DomainError> {
        validate_issue_request(username, time)?;

        let duration: KeyDuration = time.parse()?;
        let expires_at = duration.expires_at(self.clock.now_ms())?;

        let mut keys = self.keys.lock().await;
        let api_key = self
            .generator
            .generate_unique(|k| keys.contains_key(k))
            .ok_or_else(|| {
                error!(keys = keys.len(), "No unused API key found, key space exhausted");
                DomainError::internal("Failed to generate a unique key")
            })?;

        let record = KeyRecord::new(username, expires_at);
        let inserted_key = api_key.clone();
        self.commit(&mut keys, move |next| {
            next.insert(inserted_key, record);
        })
        .await?;

        info!(
            key = %key_hint(&api_key),
            username = %username,
            expires_at = ?expires_at,
            "Issued API key"
        );

        Ok(IssuedKey {
            api_key,
            expires_at,
        })
    }

    /// Validate a login, binding the key to `hwid` on first use
    pub async fn login(&self, api_key: &str, hwid: &str) -> Result<LoginOutcome, DomainError> {
        let mut keys = self.keys.lock().await;

        let record = keys
            .get(api_key)
            .ok_or_else(|| DomainError::not_found("Invalid key"))?;

        if record.is_expired(self.clock.now_ms()) {
            debug!(key = %key_hint(api_key), "Login rejected, key expired");
            return Err(DomainError::expired("Key expired"));
        }

        if !record.accepts(hwid) {
            debug!(key = %key_hint(api_key), "Login rejected, HWID mismatch");
            return Err(DomainError::hwid_mismatch("HWID mismatch"));
        }

        let expires_at = record.expires_at();

        if record.is_bound() {
            return Ok(LoginOutcome {
                expires_at,
                bound: false,
            });
        }

        // Only a non-empty device id can bind a key
        validate_hwid(hwid)?;

        self.commit(&mut keys, |next| {
            if let Some(record) = next.get_mut(api_key) {
                record.bind(hwid);
            }
        })
        .await?;

        info!(key = %key_hint(api_key), "Bound API key to device");

        Ok(LoginOutcome {
            expires_at,
            bound: true,
        })
    }

    /// All keys with their current state
    pub async fn list(&self) -> Vec<KeyEntry> {
        let keys = self.keys.lock().await;

        keys.iter()
            .map(|(key, record)| KeyEntry::from_record(key, record))
            .collect()
    }

    /// Clear the device binding of a key
    pub async fn reset_hwid(&self, api_key: &str) -> Result<(), DomainError> {
        let mut keys = self.keys.lock().await;

        if !keys.contains_key(api_key) {
            return Err(DomainError::not_found("Key not found"));
        }

        self.commit(&mut keys, |next| {
            if let Some(record) = next.get_mut(api_key) {
                record.reset_hwid();
            }
        })
        .await?;

        info!(key = %key_hint(api_key), "Reset HWID binding");
        Ok(())
    }

    /// Remove a key
    pub async fn delete(&self, api_key: &str) -> Result<(), DomainError> {
        let mut keys = self.keys.lock().await;

        if !keys.contains_key(api_key) {
            return Err(DomainError::not_found("Key not found"));
        }

        self.commit(&mut keys, |next| {
            next.remove(api_key);
        })
        .await?;

        info!(key = %key_hint(api_key), "Deleted API key");
        Ok(())
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.keys.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.lock().await.is_empty()
    }

    /// Apply `mutate` to a copy of `keys`, persist the copy, then adopt it
    async fn commit<F>(&self, keys: &mut KeyMap, mutate: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut KeyMap),
    {
        let mut next = keys.clone();
        mutate(&mut next);

        if let Err(e) = self.snapshot.save(&next).await {
            error!(
                location = %self.snapshot.location(),
                error = %e,
                "Failed to persist key snapshot, change discarded"
            );
            return Err(e);
        }

        *keys = next;
        Ok(())
    }
}
