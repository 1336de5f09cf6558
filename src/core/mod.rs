pub mod assembler;
pub mod catalog;
pub mod enrichment;

pub use crate::domain::model::{Car, CarFilter, CarUpdate, LookupTask};
pub use crate::domain::ports::{CarInfoClient, CarRepository, ConfigProvider};
pub use crate::utils::error::Result;
