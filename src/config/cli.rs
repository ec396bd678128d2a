use crate::config::toml_config::TomlConfig;
use crate::config::SnapshotConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "holder-snapshot")]
#[command(about = "Snapshot token holders from a block explorer, aggregate and paginate them")]
pub struct CliConfig {
    /// Optional TOML configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding Tokens.json and receiving all outputs
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Block explorer base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Holders endpoint path, `{contract}` is replaced by the token contract
    #[arg(long)]
    pub holders_path: Option<String>,

    /// Rows per pagination file
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Delay between consecutive holder page requests
    #[arg(long)]
    pub page_delay_ms: Option<u64>,

    /// Per-request timeout
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<SnapshotConfig> {
        let mut config = SnapshotConfig::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            config = config.apply_toml(&file);
        }

        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(path) = &self.holders_path {
            config.holders_path = path.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(delay) = self.page_delay_ms {
            config.page_delay_ms = delay;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        config.monitor = config.monitor || self.monitor;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npage_size = 25\nbase_dir = \"/data\"").unwrap();

        let cli = CliConfig::parse_from([
            "holder-snapshot",
            "--config",
            file.path().to_str().unwrap(),
            "--page-size",
            "10",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.page_size, 10);
        assert_eq!(config.base_dir, "/data");
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = CliConfig::parse_from(["holder-snapshot"]);
        assert_eq!(cli.resolve().unwrap(), SnapshotConfig::default());
    }
}
