//! Keygate
//!
//! Issues API keys with optional expiry, binds each key to one hardware ID
//! on first login and validates later logins against that binding:
//! - Lifetime or time-limited keys (`30min`, `12h`, `7d`, `1m`, `1y`)
//! - First-use HWID binding with explicit reset
//! - Whole-mapping JSON snapshot, rewritten atomically on every change

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::DomainError;
pub use infrastructure::license::KeyStore;
