pub mod calendar;
pub mod matcher;
pub mod service;

pub use crate::domain::model::{MonthDay, PlantGuide, PlantingSeason, ResolvedTerm, SolarTerm};
pub use crate::domain::ports::{ConfigProvider, PlantCatalog, Storage};
pub use crate::utils::error::Result;
