//! Record store port (user metadata, never cart data).

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use precocerto_core::UserId;

/// User metadata written at sign-up under `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl UserRecord {
    pub fn path_for(uid: UserId) -> String {
        format!("users/{uid}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("write to '{path}' denied")]
    Denied { path: String },

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Surface of the realtime record store the sign-up flow depends on.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Replace the record at `path`.
    async fn write(&self, path: &str, record: JsonValue) -> Result<(), WriteError>;
}

/// In-memory record store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<String, JsonValue>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, path: &str) -> Option<JsonValue> {
        self.records.read().ok()?.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn write(&self, path: &str, record: JsonValue) -> Result<(), WriteError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WriteError::Unavailable("lock poisoned".to_string()))?;
        records.insert(path.to_string(), record);
        Ok(())
    }
}
