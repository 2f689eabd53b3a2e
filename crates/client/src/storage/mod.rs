//! Key/value persistence behind the session store.
//!
//! Backends only ever see string keys and values. Two operations matter:
//! reading a group of keys as one consistent snapshot, and applying a
//! [`WriteBatch`] atomically, so a reader never observes half a login.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage failure: {0:#}")]
    Backend(#[from] anyhow::Error),
}

/// A group of removals and writes applied as one unit.
///
/// Removals are applied before writes, so a key both removed and set ends up
/// holding the new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    pub removals: Vec<String>,
    pub writes: Vec<(String, String)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.removals.push(key.into());
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.writes.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.writes.is_empty()
    }
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the listed keys in one consistent snapshot. Absent keys are
    /// simply missing from the result.
    async fn load(&self, keys: &[&str]) -> Result<BTreeMap<String, String>, StorageError>;

    /// Apply every removal and write in `batch`, or none of them.
    async fn apply(&self, batch: WriteBatch) -> Result<(), StorageError>;
}
