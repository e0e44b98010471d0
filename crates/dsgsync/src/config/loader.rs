use std::path::{Path, PathBuf};

use url::Url;

use crate::config::schema::{Config, ConfigFormat, CONFIG_VERSION};
use crate::error::ConfigError;
use crate::schedule::calendar::MAX_DURATION_HOURS;

pub const ENV_BASE_DIR: &str = "DSGS_DIR";
pub const ENV_PORTAL_URL: &str = "PORTAL_URL";
pub const ENV_SEARCH_NAME: &str = "SEARCH_NAME";
pub const ENV_TIMEZONE: &str = "LOCAL_TIMEZONE";
pub const ENV_DURATION_HOURS: &str = "SERVICE_DURATION_HOURS";
pub const ENV_REMINDER_MINUTES: &str = "REMINDER_MINUTES";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = ConfigFormat::from_extension(path.extension().and_then(|e| e.to_str()));
    load_config_from_str(&content, format)
}

pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };

    validate_config(&config)?;

    Ok(config)
}

/// `<platform config dir>/dsgsync/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dsgsync").join("config.json"))
}

/// Applies the process environment on top of a loaded config.
pub fn apply_env_overrides(config: Config) -> Result<Config, ConfigError> {
    apply_overrides_with(config, |name| std::env::var(name).ok())
}

/// Applies overrides from `lookup`, then re-validates.
pub fn apply_overrides_with<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(dir) = get(ENV_BASE_DIR) {
        config.base_dir = PathBuf::from(dir.trim());
    }
    if let Some(url) = get(ENV_PORTAL_URL) {
        config.portal_url = url.trim().to_string();
    }
    if let Some(name) = get(ENV_SEARCH_NAME) {
        config.search_name = Some(name.trim().to_string());
    }
    if let Some(tz) = get(ENV_TIMEZONE) {
        config.calendar.timezone = tz.trim().to_string();
    }
    if let Some(value) = get(ENV_DURATION_HOURS) {
        config.calendar.duration_hours =
            value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_DURATION_HOURS,
                value: value.clone(),
            })?;
    }
    if let Some(value) = get(ENV_REMINDER_MINUTES) {
        config.calendar.reminder_minutes =
            value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_REMINDER_MINUTES,
                value: value.clone(),
            })?;
    }

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.base_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation {
            message: "base_dir must not be empty".to_string(),
        });
    }

    if let Err(e) = Url::parse(&config.portal_url) {
        return Err(ConfigError::Validation {
            message: format!("portal_url '{}' is not an absolute URL: {}", config.portal_url, e),
        });
    }

    let selection = &config.selection;
    if !(0.0..=1.0).contains(&selection.highlight_opacity) {
        return Err(ConfigError::Validation {
            message: format!(
                "highlight_opacity must be between 0 and 1, got {}",
                selection.highlight_opacity
            ),
        });
    }
    for (name, rgb) in &selection.minister_highlight_colors {
        if !rgb.is_valid() {
            return Err(ConfigError::Validation {
                message: format!("Highlight colour for '{}' has components outside [0, 1]", name),
            });
        }
    }

    let duration = config.calendar.duration_hours;
    if !duration.is_finite() || duration <= 0.0 || duration > MAX_DURATION_HOURS {
        return Err(ConfigError::Validation {
            message: format!(
                "calendar.duration_hours must be in (0, {}], got {}",
                MAX_DURATION_HOURS, duration
            ),
        });
    }

    Ok(())
}
