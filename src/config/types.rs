use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::details::DetailsOptions;
use crate::ui::mvi::SharingPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Timing of the screen controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// How long a repository subscription outlives its last observer (default: 5000).
    #[serde(default = "default_subscription_grace_ms")]
    pub subscription_grace_ms: u64,
    /// How long a missing item may stay unresolved before the details
    /// screen reports it (default: 3000).
    #[serde(default = "default_not_found_timeout_ms")]
    pub not_found_timeout_ms: u64,
}

/// Where the initial items come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file holding an array of items. Relative paths resolve against
    /// the config file's directory.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_subscription_grace_ms() -> u64 {
    5_000
}

fn default_not_found_timeout_ms() -> u64 {
    3_000
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            subscription_grace_ms: default_subscription_grace_ms(),
            not_found_timeout_ms: default_not_found_timeout_ms(),
        }
    }
}

impl ControllerConfig {
    pub fn subscription_grace(&self) -> Duration {
        Duration::from_millis(self.subscription_grace_ms)
    }

    pub fn not_found_timeout(&self) -> Duration {
        Duration::from_millis(self.not_found_timeout_ms)
    }

    pub fn sharing_policy(&self) -> SharingPolicy {
        SharingPolicy::while_subscribed(self.subscription_grace())
    }
}

impl From<&ControllerConfig> for DetailsOptions {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            sharing: config.sharing_policy(),
            not_found_timeout: config.not_found_timeout(),
        }
    }
}
