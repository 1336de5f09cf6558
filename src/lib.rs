pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpCarInfoClient, memory::InMemoryCarRepository};
pub use config::{env::EnvConfig, toml_config::TomlConfig};
pub use core::{catalog::CatalogService, enrichment::EnrichmentPool};
pub use domain::model::{Car, CarFilter, CarUpdate};
pub use utils::error::{CatalogError, Result};
