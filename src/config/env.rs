use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::time::Duration;

/// 由環境變數讀取的設定（CAR_INFO_URL、MAX_WORKERS ...）
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub car_info_url: String,
    pub max_workers: usize,
    pub queue_capacity: Option<usize>,
    pub request_timeout_seconds: Option<u64>,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let car_info_url = lookup("CAR_INFO_URL").ok_or_else(|| CatalogError::MissingConfigError {
            field: "CAR_INFO_URL".to_string(),
        })?;

        Ok(Self {
            car_info_url,
            max_workers: parse_var(&lookup, "MAX_WORKERS")?.unwrap_or(5),
            queue_capacity: parse_var(&lookup, "QUEUE_CAPACITY")?,
            request_timeout_seconds: parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS")?,
            debug: parse_var(&lookup, "DEBUG")?.unwrap_or(false),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e: T::Err| CatalogError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl ConfigProvider for EnvConfig {
    fn car_info_url(&self) -> &str {
        &self.car_info_url
    }

    fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or_else(|| self.max_workers.saturating_mul(10))
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}
