use crate::domain::model::{ActiveFlag, HoursSet, WriteOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{HoursError, Result};
use crate::utils::validation::validate_hours_name;

/// Maps named hours sets onto a [`Storage`] backend. Nothing is cached; every
/// read goes back to the backend.
pub struct HoursStore<S: Storage> {
    storage: S,
}

impl<S: Storage> HoursStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn list_names(&self) -> Result<Vec<String>> {
        let names = self.storage.list_keys().await?;
        tracing::debug!("Listed {} hours sets", names.len());
        Ok(names)
    }

    pub async fn read_active_flag(&self, name: &str) -> Result<bool> {
        validate_hours_name(name)?;
        let raw = self.storage.read(name).await?;
        let flag: ActiveFlag = serde_json::from_slice(&raw).map_err(|source| HoursError::Parse {
            name: name.to_string(),
            source,
        })?;
        Ok(flag.active)
    }

    pub async fn read(&self, name: &str) -> Result<HoursSet> {
        validate_hours_name(name)?;
        let raw = self.storage.read(name).await?;
        serde_json::from_slice(&raw).map_err(|source| HoursError::Parse {
            name: name.to_string(),
            source,
        })
    }

    pub async fn write(&self, name: &str, set: &HoursSet) -> Result<WriteOutcome> {
        validate_hours_name(name)?;
        let data = serde_json::to_vec(set)?;
        let outcome = self.storage.write(name, &data).await?;
        tracing::debug!("Wrote hours set {} ({:?})", name, outcome);
        Ok(outcome)
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_hours_name(name)?;
        self.storage.delete(name).await?;
        tracing::debug!("Deleted hours set {}", name);
        Ok(())
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        validate_hours_name(name)?;
        self.storage.exists(name).await
    }
}
