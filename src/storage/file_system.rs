use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::Storage;
use crate::error::StorageError;

const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// File-backed storage: each key is one file under the base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new storage instance with the default base directory ("./wallets")
    pub fn new() -> Self {
        Self::new_with_base_dir(PathBuf::from("./wallets"))
    }

    /// Create storage with custom base directory
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    /// File path for a key; ':' is not portable in file names.
    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StorageError::Backend(format!("Invalid storage key: {}", key)));
        }
        let file_name = format!("{}.{}", key.replace(':', "_"), RECORD_EXTENSION);
        Ok(self.base_path.join(file_name))
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.base_path)?;

        // Write-then-rename so a crash never leaves a truncated record.
        let tmp = path.with_extension(TEMP_EXTENSION);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<Option<String>, StorageError> {
        let previous = self.get(key)?;
        if previous.is_some() {
            fs::remove_file(self.record_path(key)?)?;
            log::debug!("Deleted {}", key);
        }
        Ok(previous)
    }

    fn has(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.record_path(key)?.is_file())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if !self.base_path.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            // Records and the temp files an interrupted `set` leaves behind.
            let owned = path
                .extension()
                .map(|ext| ext == RECORD_EXTENSION || ext == TEMP_EXTENSION)
                .unwrap_or(false);
            if path.is_file() && owned {
                fs::remove_file(&path)?;
            }
        }
        log::warn!("Cleared storage directory: {:?}", self.base_path);
        Ok(())
    }
}
