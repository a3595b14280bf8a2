use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use folks_core::{ClientConfig, DeletePolicy, ListConfig, PollPolicy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const FILE_NAME: &str = "folks.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            timeout_secs: client.timeout.as_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PollingSection {
    pub interval_ms: u64,
    pub backoff: f64,
    pub max_interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for PollingSection {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            interval_ms: policy.initial_interval.as_millis() as u64,
            backoff: policy.backoff,
            max_interval_ms: policy.max_interval.as_millis() as u64,
            max_attempts: policy.max_attempts,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListSection {
    pub settle_delay_ms: u64,
    pub delete_policy: DeletePolicy,
    pub retain_failed_selection: bool,
}

/// Contents of `folks.toml`; every key is optional
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub polling: PollingSection,
    pub list: ListSection,
}

impl Config {
    /// `<config dir>/folks/folks.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folks").join(FILE_NAME))
    }

    /// Load from `path`, or the default location. Problems are logged and
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            warn!("could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.server.base_url.clone(),
            timeout: Duration::from_secs(self.server.timeout_secs),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_interval: Duration::from_millis(self.polling.interval_ms),
            backoff: self.polling.backoff,
            max_interval: Duration::from_millis(self.polling.max_interval_ms),
            max_attempts: self.polling.max_attempts,
        }
    }

    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            settle_delay: Duration::from_millis(self.list.settle_delay_ms),
            delete_policy: self.list.delete_policy,
            retain_failed_selection: self.list.retain_failed_selection,
            poll_policy: self.poll_policy(),
        }
    }
}
