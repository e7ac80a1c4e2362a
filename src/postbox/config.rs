use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";
const DEFAULT_PRICE_PAIR: &str = "ICP-USD";
const DEFAULT_REFRESH_DELAY_MS: u64 = 2000;

/// Configuration for postbox, stored in config.json under the user config
/// directory (or wherever `--config-dir` points).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostboxConfig {
    /// Base URL of the post-storage service.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Currency pair for the `price` command; `None` disables the feed.
    #[serde(default = "default_price_pair")]
    pub price_pair: Option<String>,

    /// Delay before the post-create list refresh, in milliseconds.
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_price_pair() -> Option<String> {
    Some(DEFAULT_PRICE_PAIR.to_string())
}

fn default_refresh_delay_ms() -> u64 {
    DEFAULT_REFRESH_DELAY_MS
}

impl Default for PostboxConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            price_pair: default_price_pair(),
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
        }
    }
}

impl PostboxConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PostboxConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
