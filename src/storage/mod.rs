mod persistence;
mod sqlite_store;

pub use persistence::{
    Persistence, Snapshot, DARK_MODE_KEY, DESIGNS_KEY, EMPLOYEES_KEY, ORDERS_KEY,
};
pub use sqlite_store::SqliteStore;

use std::collections::HashMap;

use crate::error::Result;

/// Opaque string key-value store backing the studio.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
