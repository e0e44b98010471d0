use std::path::PathBuf;

use url::Url;

use crate::config::Config;
use crate::error::ConfigError;
use crate::selection::UserSelection;

pub struct PipelineConfig {
    pub base_dir: PathBuf,
    pub portal_url: Url,
    pub overwrite: bool,
    pub selection: UserSelection,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let portal_url = Url::parse(&config.portal_url).map_err(|e| ConfigError::Validation {
            message: format!("portal_url '{}' is not an absolute URL: {}", config.portal_url, e),
        })?;

        Ok(Self {
            base_dir: config.base_dir.clone(),
            portal_url,
            overwrite: config.overwrite,
            selection: config.selection.clone(),
        })
    }
}
