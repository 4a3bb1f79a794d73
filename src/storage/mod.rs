//! Log persistence (one JSON array in a single slot), migration, and file export.
//!
//! The whole collection is read and rewritten on every change.

mod error;
mod export;
pub mod migrate;
mod slot;
mod store;

pub use error::StorageError;
pub use export::{default_export_path, export_to_path, import_from_path};
pub use slot::{FileSlot, MemorySlot, Slot};
pub use store::LogStore;
