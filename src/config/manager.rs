use super::{
    dashboard::DashboardConfig,
    data::DataConfig,
    traits::ConfigSection,
};
use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `ECOMDASH__DATA__DATA_DIR`
pub const ENV_PREFIX: &str = "ECOMDASH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), DashboardError> {
        self.data.validate().map_err(|e| in_section::<DataConfig>(e))?;
        self.dashboard.validate().map_err(|e| in_section::<DashboardConfig>(e))?;
        Ok(())
    }

    /// Write as pretty TOML, every field included so a reload gives the same values
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DashboardError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| DashboardError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| DashboardError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

fn in_section<S: ConfigSection>(e: DashboardError) -> DashboardError {
    match e {
        DashboardError::Configuration(msg) => {
            DashboardError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer an optional TOML file and `ECOMDASH__*` environment variables over the defaults
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DashboardError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
        }

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DashboardError> {
        self.get().save_to_file(path)
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Apply `f` to a copy and keep it only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), DashboardError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
