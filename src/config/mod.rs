#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::paginator::DEFAULT_PAGE_SIZE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_template, validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://zero-network.calderaexplorer.xyz";
pub const DEFAULT_HOLDERS_PATH: &str = "/api/v2/tokens/{contract}/instances/1/holders";
pub const DEFAULT_PAGE_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 合併預設值、TOML 檔與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub api_base_url: String,
    pub holders_path: String,
    pub base_dir: String,
    pub page_size: usize,
    pub page_delay_ms: u64,
    pub timeout_seconds: u64,
    pub monitor: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            holders_path: DEFAULT_HOLDERS_PATH.to_string(),
            base_dir: ".".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            monitor: false,
        }
    }
}

impl SnapshotConfig {
    pub fn apply_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(source) = &file.source {
            if let Some(endpoint) = &source.endpoint {
                self.api_base_url = endpoint.clone();
            }
            if let Some(path) = &source.holders_path {
                self.holders_path = path.clone();
            }
            if let Some(timeout) = source.timeout_seconds {
                self.timeout_seconds = timeout;
            }
            if let Some(delay) = source.page_delay_ms {
                self.page_delay_ms = delay;
            }
        }
        if let Some(output) = &file.output {
            if let Some(base_dir) = &output.base_dir {
                self.base_dir = base_dir.clone();
            }
            if let Some(page_size) = output.page_size {
                self.page_size = page_size;
            }
        }
        self.monitor = self.monitor || file.monitoring_enabled();
        self
    }
}

impl ConfigProvider for SnapshotConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn holders_path(&self) -> &str {
        &self.holders_path
    }

    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for SnapshotConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_template("holders_path", &self.holders_path, "{contract}")?;
        validate_path("base_dir", &self.base_dir)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SnapshotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.page_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[source]
endpoint = "http://localhost:4000"

[output]
page_size = 20
"#,
        )
        .unwrap();

        let config = SnapshotConfig::default().apply_toml(&file);

        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.holders_path, DEFAULT_HOLDERS_PATH);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = SnapshotConfig {
            page_size: 0,
            ..SnapshotConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SnapshotConfig {
            holders_path: "/api/v2/holders".to_string(),
            ..SnapshotConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SnapshotConfig {
            api_base_url: "ftp://explorer".to_string(),
            ..SnapshotConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
