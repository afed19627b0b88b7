use crate::domain::model::WriteOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Key-value port the hours store sits on. Keys are already-validated set
/// names; values are the serialized set bytes.
///
/// Missing keys are reported as `HoursError::NotFound`. `list_keys` returns
/// `HoursError::NoHours` when nothing is stored yet.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_keys(&self) -> Result<Vec<String>>;
    async fn exists(&self, key: &str) -> Result<bool>;
    async fn read(&self, key: &str) -> Result<Vec<u8>>;
    async fn write(&self, key: &str, data: &[u8]) -> Result<WriteOutcome>;
    async fn delete(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: Storage + ?Sized> Storage for Box<S> {
    async fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys().await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<WriteOutcome> {
        (**self).write(key, data).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}

#[async_trait]
impl<S: Storage + ?Sized> Storage for Arc<S> {
    async fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys().await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<WriteOutcome> {
        (**self).write(key, data).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}
