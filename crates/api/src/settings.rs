//! Server Settings

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration, defaults overridable through `PREDICT_*`
/// environment variables (e.g. `PREDICT_LISTEN_ADDR`, `PREDICT_MODEL_DIR`)
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Directory holding the frozen model artifacts
    pub model_dir: PathBuf,
}

impl Settings {
    /// Load settings from defaults plus the environment
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("model_dir", "models")?
            .add_source(Environment::with_prefix("PREDICT"))
            .build()?
            .try_deserialize()
    }
}
