//! Storage and persistence layer
//!
//! - `keys.rs` - storage key naming scheme
//! - `memory.rs` - in-process backend
//! - `file_system.rs` - one-file-per-key backend
//!
//! Values are the JSON strings produced by each record's own serializer.

mod file_system;
pub mod keys;
mod memory;

pub use file_system::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// One mutation in a [`Storage::apply`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set { key: String, value: String },
    Delete { key: String },
}

impl StorageOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        StorageOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        StorageOp::Delete { key: key.into() }
    }
}

/// Synchronous key-value persistence used by the wallet core.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key, returning the value it held.
    fn delete(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn has(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }

    fn clear(&self) -> Result<(), StorageError>;

    /// Apply several mutations. Backends that can make the batch atomic
    /// override this; the default applies them in order and stops at the
    /// first failure.
    fn apply(&self, ops: Vec<StorageOp>) -> Result<(), StorageError> {
        for op in ops {
            match op {
                StorageOp::Set { key, value } => self.set(&key, &value)?,
                StorageOp::Delete { key } => {
                    self.delete(&key)?;
                }
            }
        }
        Ok(())
    }
}

/// Read a record that must exist.
pub fn get_required(storage: &dyn Storage, key: &str) -> Result<String, StorageError> {
    storage
        .get(key)?
        .ok_or_else(|| StorageError::RecordNotFound(key.to_string()))
}
