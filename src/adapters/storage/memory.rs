use crate::domain::model::WriteOutcome;
use crate::domain::ports::Storage;
use crate::utils::error::{HoursError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process backend. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return Err(HoursError::NoHours);
        }
        Ok(entries.keys().cloned().collect())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| HoursError::NotFound {
                name: key.to_string(),
            })
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<WriteOutcome> {
        let previous = self
            .entries
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(match previous {
            Some(_) => WriteOutcome::Replaced,
            None => WriteOutcome::Created,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| HoursError::NotFound {
                name: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_lifecycle() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.list_keys().await, Err(HoursError::NoHours)));

        assert_eq!(storage.write("b", b"1").await.unwrap(), WriteOutcome::Created);
        assert_eq!(storage.write("a", b"2").await.unwrap(), WriteOutcome::Created);
        assert_eq!(storage.write("b", b"3").await.unwrap(), WriteOutcome::Replaced);

        assert_eq!(storage.list_keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(storage.read("b").await.unwrap(), b"3".to_vec());

        storage.delete("a").await.unwrap();
        assert!(!storage.exists("a").await.unwrap());
        assert!(matches!(
            storage.delete("a").await,
            Err(HoursError::NotFound { .. })
        ));
    }
}
