//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::license::KeyStore;

/// Handle to the process-wide key store
#[derive(Debug, Clone)]
pub struct AppState {
    pub key_store: Arc<KeyStore>,
}

impl AppState {
    pub fn new(key_store: Arc<KeyStore>) -> Self {
        Self { key_store }
    }
}
