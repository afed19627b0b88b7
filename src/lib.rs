pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{hours_router, ApiError, ErrorBody};
pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::AppConfig;
pub use crate::core::{service::HoursService, store::HoursStore};
pub use domain::model::{
    ClockTime, DateOverrideHours, HoursSet, NamedHoursSet, WeeklyHours, WriteOutcome,
};
pub use utils::error::{ErrorKind, HoursError, Result};
