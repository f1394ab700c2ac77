//! File-backed key-value storage
//!
//! Each key maps to `<dir>/<key>.json`.

use std::path::PathBuf;

use crate::error::{FinanceError, FinanceResult};

use super::file_io::{read_text, write_text_atomic};
use super::KeyValueStorage;

/// Durable storage keeping one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the given directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing a key
    pub fn path_for(&self, key: &str) -> FinanceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(FinanceError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        read_text(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> FinanceResult<()> {
        write_text_atomic(self.path_for(key)?, value)
    }
}
