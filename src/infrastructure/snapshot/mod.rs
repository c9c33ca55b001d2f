//! Snapshot store implementations

mod in_memory;
mod json_file;

pub use in_memory::InMemorySnapshot;
pub use json_file::{JsonFileSnapshot, DEFAULT_SNAPSHOT_FILE};
