//! Snapshot domain - persistence contract for the key mapping

mod repository;

pub use repository::SnapshotStore;
