//! License key infrastructure
//!
//! The key store and the generator it draws new keys from.

mod generator;
mod store;

pub use generator::{KeyGenerator, DEFAULT_KEY_LENGTH};
pub use store::KeyStore;
