//! Persistence and export of the path collection.

pub mod export;
pub mod snapshot;
pub mod storage;

pub use export::{export_snapshot, ExportFormat, ExportedFile};
pub use snapshot::{PathRecord, PointRecord, Snapshot, SNAPSHOT_VERSION};
pub use storage::{FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};
