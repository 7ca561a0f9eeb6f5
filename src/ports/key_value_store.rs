//! Key-Value Store Port - Interface for snapshot persistence.
//!
//! Models the browser-local storage contract: synchronous string get/set/
//! remove with no structure imposed on values. The RAID store and the assess
//! handler persist JSON snapshots through this port; an absent or unreadable
//! value is always treated as "no prior state".

use thiserror::Error;

/// Port for key-value string persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors that can occur during key-value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize stored state: {0}")]
    SerializationFailed(String),
}

impl StorageError {
    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}
