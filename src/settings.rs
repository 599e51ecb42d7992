//! Run configuration.
//!
//! Everything has a built-in default. An optional `pref.toml` in the working
//! directory may override any field:
//!
//! ```toml
//! source_list = "sources.txt"
//! clash_output = "out/sub.yaml"
//! fetch_timeout = 5
//! max_concur_threads = 1
//! ```

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings structure to hold the run configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File listing subscription URLs and inline links, one per line
    pub source_list: String,
    pub clash_template: String,
    pub clash_output: String,
    /// Optional; a built-in skeleton is used when the file is missing
    pub v2ray_template: String,
    pub v2ray_output: String,
    pub raw_uri_output: String,
    pub subscription_output: String,
    /// Per-request timeout in seconds
    pub fetch_timeout: u64,
    /// Number of subscriptions downloaded at once; 1 fetches strictly in order
    pub max_concur_threads: usize,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_list: DEFAULT_SOURCE_LIST.to_string(),
            clash_template: DEFAULT_CLASH_TEMPLATE.to_string(),
            clash_output: DEFAULT_CLASH_OUTPUT.to_string(),
            v2ray_template: DEFAULT_V2RAY_TEMPLATE.to_string(),
            v2ray_output: DEFAULT_V2RAY_OUTPUT.to_string(),
            raw_uri_output: DEFAULT_RAW_URI_OUTPUT.to_string(),
            subscription_output: DEFAULT_SUBSCRIPTION_OUTPUT.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concur_threads: DEFAULT_CONCUR_THREADS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML content. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &str) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists. A missing file silently gives the defaults,
    /// a broken one is reported and also gives the defaults.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            return Settings::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                info!("loaded preferences from {}", path);
                settings
            }
            Err(e) => {
                warn!("ignoring {}: {}", path, e);
                Settings::default()
            }
        }
    }
}
