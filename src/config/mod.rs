//! Application configuration loaded from TOML.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ControllerConfig, DataConfig};
