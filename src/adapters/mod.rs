// Adapters layer: concrete storage backends and the HTTP boundary.

pub mod http;
pub mod storage;

use crate::config::toml_config::{AppConfig, StorageConfig};
use crate::core::service::HoursService;
use crate::domain::ports::Storage;
use axum::Router;
use storage::{LocalStorage, MemoryStorage};

pub fn build_storage(config: &StorageConfig) -> Box<dyn Storage> {
    match config.backend.as_str() {
        "memory" => Box::new(MemoryStorage::new()),
        _ => {
            let mut local = LocalStorage::new(&config.directory);
            if let Some(mode) = config.file_mode {
                local = local.with_file_mode(mode);
            }
            Box::new(local)
        }
    }
}

pub fn build_service(config: &StorageConfig) -> HoursService<Box<dyn Storage>> {
    HoursService::new(build_storage(config))
}

pub fn build_router(config: &AppConfig) -> Router {
    http::hours_router(build_service(&config.storage), &config.api.base_path)
}
