//! API key generation
//!
//! Keys are opaque lowercase alphanumeric identifiers. They are unique within
//! the store but are not meant to be secrets of cryptographic strength.

use rand::Rng;

/// Characters used in generated keys
const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default number of characters in a key
pub const DEFAULT_KEY_LENGTH: usize = 16;

/// Attempts before `generate_unique` gives up
pub const MAX_GENERATE_ATTEMPTS: usize = 1_000;

/// Generator for API keys
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    length: usize,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self {
            length: DEFAULT_KEY_LENGTH,
        }
    }

    /// Set the number of characters per key
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a new key
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();

        (0..self.length)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
            .collect()
    }

    /// Generate a key for which `is_taken` returns false
    ///
    /// Returns `None` when every attempt collided.
    pub fn generate_unique(&self, is_taken: impl Fn(&str) -> bool) -> Option<String> {
        (0..MAX_GENERATE_ATTEMPTS)
            .map(|_| self.generate())
            .find(|key| !is_taken(key))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
