//! Infrastructure layer - Key store, snapshot persistence and logging

pub mod license;
pub mod logging;
pub mod snapshot;
