use crate::domain::csv::LoaderConfig;
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

pub const ENV_PREFIX: &str = "CSV_MEMSTORE_";

pub struct ConfigService;

impl ConfigService {
    /// Defaults, then the optional TOML file, then `CSV_MEMSTORE_*` variables.
    pub fn load(path: Option<&Path>) -> Result<LoaderConfig> {
        let mut figment = Figment::from(Serialized::defaults(LoaderConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: LoaderConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load loader config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
