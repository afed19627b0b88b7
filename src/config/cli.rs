use crate::core::service::HoursService;
use crate::domain::model::{HoursNamesResponse, HoursSet, WriteOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{HoursError, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Serve the hours API over HTTP
    Serve {
        /// Address to bind, overrides `server.address`
        #[arg(long)]
        addr: Option<String>,
    },
    /// List the names of all stored hours sets
    List,
    /// List the names of active hours sets
    Active,
    /// Print one hours set
    Get { name: String },
    /// Create or replace an hours set from a JSON file
    Put { name: String, file: PathBuf },
    /// Delete an hours set
    Delete { name: String },
}

impl Command {
    pub fn is_serve(&self) -> bool {
        matches!(self, Command::Serve { .. })
    }

    /// Runs a one-shot command directly against the store and returns what
    /// should be printed. `serve` is handled by the binary.
    pub async fn run<S: Storage>(&self, service: &HoursService<S>) -> Result<String> {
        let output = match self {
            Command::Serve { .. } => {
                return Err(HoursError::internal("serve is not a one-shot command"))
            }
            Command::List => names_json(service.list_all_names().await?)?,
            Command::Active => names_json(service.list_active_names().await?)?,
            Command::Get { name } => serde_json::to_string_pretty(&service.get_by_name(name).await?)?,
            Command::Put { name, file } => {
                let set = read_set(file)?;
                match service.upsert(name, &set).await? {
                    WriteOutcome::Created => format!("Created {}", name),
                    WriteOutcome::Replaced => format!("Replaced {}", name),
                }
            }
            Command::Delete { name } => {
                service.delete_by_name(name).await?;
                format!("Deleted {}", name)
            }
        };
        Ok(output)
    }
}

fn names_json(hours_names: Vec<String>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&HoursNamesResponse { hours_names })?)
}

fn read_set(file: &Path) -> Result<HoursSet> {
    let raw = std::fs::read(file)?;
    serde_json::from_slice(&raw).map_err(|e| HoursError::BadRequest {
        message: format!("{} is not a valid hours set: {}", file.display(), e),
    })
}
