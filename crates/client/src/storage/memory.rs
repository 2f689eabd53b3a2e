use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use super::{SessionStorage, StorageError, WriteBatch};

/// In-memory storage for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry.
    pub fn entries(&self) -> BTreeMap<String, String> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self, keys: &[&str]) -> Result<BTreeMap<String, String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(keys
            .iter()
            .filter_map(|k| guard.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        for key in &batch.removals {
            guard.remove(key);
        }
        for (key, value) in batch.writes {
            guard.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removals_run_before_writes() {
        let storage = MemoryStorage::new();
        storage
            .apply(WriteBatch::new().set("token", "old").set("roles", "HR"))
            .await
            .unwrap();
        storage
            .apply(WriteBatch::new().remove("token").remove("roles").set("token", "new"))
            .await
            .unwrap();

        let loaded = storage.load(&["token", "roles"]).await.unwrap();
        assert_eq!(loaded.get("token").map(String::as_str), Some("new"));
        assert!(!loaded.contains_key("roles"));
    }
}
