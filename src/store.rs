//! Key-value settings persistence boundary.
//!
//! The engine reads and writes one JSON record under one key. Writes are
//! whole-record replacements — no partial update, no transaction — so the last
//! writer wins, and reads never block writers.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::Result;

/// Async key-value store for persisted records. "Absent" is a normal answer,
/// treated identically to "default record present" by consumers.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-process store, used by tests and short-lived embedders.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.records.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.records.lock().insert(key.to_string(), value);
        Ok(())
    }
}
