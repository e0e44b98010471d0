pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, apply_overrides_with, default_config_path, load_config,
    load_config_from_str,
};
pub use schema::{Config, ConfigFormat, CONFIG_VERSION};
