use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub inventory: InventoryConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Spreadsheet holding the listings
    pub path: PathBuf,
    /// Worksheet to read; the first one when unset
    pub sheet: Option<String>,
    /// Rows returned by the cheapest / most expensive / best rated queries
    pub result_limit: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("phones.xlsx"),
            sheet: None,
            result_limit: crate::inventory::query::RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

/// Load configuration from an optional TOML file plus `PHONE_FINDER__*` env overrides
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PHONE_FINDER").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.inventory.path.as_os_str().is_empty() {
        anyhow::bail!("Inventory path cannot be empty");
    }

    if cfg.inventory.result_limit == 0 {
        anyhow::bail!("Inventory result_limit must be at least 1");
    }

    if let Some(sheet) = &cfg.inventory.sheet {
        if sheet.trim().is_empty() {
            anyhow::bail!("Inventory sheet name cannot be blank");
        }
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!(
            "Metrics endpoint must start with '/': {}",
            cfg.metrics.endpoint
        );
    }

    Ok(())
}
