pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use adapters::catalog::{InMemoryCatalog, StorageCatalog};
pub use core::{calendar::SolarTermCalendar, matcher::GuideLimit, service::GuideService};
pub use utils::error::{Result, TogrowError};
