pub mod service;
pub mod store;

pub use crate::domain::model::{HoursSet, NamedHoursSet, WriteOutcome};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
