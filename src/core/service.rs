use crate::core::store::HoursStore;
use crate::domain::model::{HoursSet, WriteOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{HoursError, Result};

pub struct HoursService<S: Storage> {
    store: HoursStore<S>,
}

impl<S: Storage> HoursService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            store: HoursStore::new(storage),
        }
    }

    pub fn store(&self) -> &HoursStore<S> {
        &self.store
    }

    pub async fn list_all_names(&self) -> Result<Vec<String>> {
        self.store.list_names().await
    }

    /// Names whose set has `active` set, in listing order.
    ///
    /// A name that disappears or fails to parse after it was listed is an
    /// internal error, not a `NotFound`.
    pub async fn list_active_names(&self) -> Result<Vec<String>> {
        let names = self.store.list_names().await?;

        let mut active = Vec::new();
        for name in names {
            match self.store.read_active_flag(&name).await {
                Ok(true) => active.push(name),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to check whether {} is active: {}", name, e);
                    return Err(HoursError::internal(format!(
                        "could not read hours set {} after listing it: {}",
                        name, e
                    )));
                }
            }
        }

        Ok(active)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<HoursSet> {
        self.store.read(name).await
    }

    pub async fn upsert(&self, name: &str, set: &HoursSet) -> Result<WriteOutcome> {
        let outcome = self.store.write(name, set).await?;
        tracing::info!("Stored hours set {} ({:?})", name, outcome);
        Ok(outcome)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        self.store.delete(name).await?;
        tracing::info!("Deleted hours set {}", name);
        Ok(())
    }
}
