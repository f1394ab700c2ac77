//! Storage layer for fintrack
//!
//! The finance store persists its document through a [`KeyValueStorage`]:
//! a set of named text slots. [`FileStorage`] keeps each slot in a JSON file
//! written atomically; [`MemoryStorage`] keeps them in memory.

pub mod file;
pub mod file_io;
pub mod memory;

pub use file::FileStorage;
pub use file_io::{read_text, write_text_atomic};
pub use memory::MemoryStorage;

use crate::error::FinanceResult;

/// Durable named text slots
pub trait KeyValueStorage {
    /// Read a slot, `None` if it has never been written
    fn get(&self, key: &str) -> FinanceResult<Option<String>>;

    /// Replace the contents of a slot
    fn set(&self, key: &str, value: &str) -> FinanceResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> FinanceResult<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> FinanceResult<()> {
        (**self).set(key, value)
    }
}
