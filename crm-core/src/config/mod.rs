use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Settings shared by every crate in the workspace.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load from `configuration.*` and `APP__*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        load("configuration", "APP")
    }
}

/// Load a settings struct from an optional file plus prefixed environment
/// variables.
///
/// `file_stem` is resolved by the `config` crate against every supported
/// extension (`costing.toml`, `costing.yaml`, ...). Environment variables use
/// `__` both after the prefix and between nested keys, e.g.
/// `COSTING__MAX_QUANTITY`. A `.env` file is read first if present.
pub fn load<T: DeserializeOwned>(file_stem: &str, env_prefix: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(Environment::with_prefix(env_prefix).separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}
