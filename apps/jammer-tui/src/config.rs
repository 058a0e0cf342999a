//! TUI configuration file.
//!
//! ```toml
//! [client]
//! base_url = "https://api.ldjam.com"
//! timeout_secs = 30
//! session_token = "..."
//!
//! [team]
//! min_adder_candidates = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jammer_node::{ClientConfig, ConfigError};
use jammer_team::TeamConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub team: TeamConfig,
}

impl AppConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    /// Environment overrides are applied and the result validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => match ClientConfig::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
                None => Self::default(),
            },
        };
        config.client = config.client.with_env_overrides();
        config.client.validate()?;
        Ok(config)
    }
}

/// Where logs go unless `--log-file` says otherwise.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("jammer")
        .join("jammer-tui.log")
}
