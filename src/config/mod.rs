pub mod env;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_pool_settings, validate_url};

#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "auto-catalog")]
#[command(about = "Enrich registration numbers with data from a car info service")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8081/info")]
    pub car_info_url: String,

    #[arg(long, default_value = "5")]
    pub max_workers: usize,

    /// 預設為 max_workers 的十倍
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Read settings from CAR_INFO_URL, MAX_WORKERS, ... environment variables")]
    pub from_env: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// 要查詢的車牌號碼
    pub reg_nums: Vec<String>,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
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
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// 所有設定來源共用的檢查
pub fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    validate_url("car_info_url", config.car_info_url())?;
    validate_pool_settings(config.max_workers(), config.queue_capacity())?;
    tracing::debug!("Configuration validation passed");
    Ok(())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["auto-catalog", "AA1111", "BB2222"]);

        assert_eq!(config.max_workers(), 5);
        assert_eq!(config.queue_capacity(), 50);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.reg_nums, vec!["AA1111", "BB2222"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_small_queue() {
        let config = CliConfig::parse_from([
            "auto-catalog",
            "--max-workers",
            "8",
            "--queue-capacity",
            "4",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_timeout() {
        let config = CliConfig::parse_from(["auto-catalog", "--timeout-seconds", "3"]);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_cli_from_env_flag() {
        assert!(!CliConfig::parse_from(["auto-catalog"]).from_env);

        let config = CliConfig::parse_from(["auto-catalog", "--from-env", "AA1111"]);
        assert!(config.from_env);
        assert_eq!(config.reg_nums, vec!["AA1111"]);
    }
}
