//! Untyped key-value persistence substrate.
//!
//! Everything the dashboard remembers lives under a handful of string keys,
//! the same way a browser's local storage would hold it. Values are opaque
//! strings; the repositories decide what goes inside them.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage file {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
    #[error("Could not serialize storage contents: {0}")]
    Serialize(String),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
