use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::schedule::CalendarSettings;
use crate::selection::UserSelection;

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,

    /// Root of the DSG folder tree.
    pub base_dir: PathBuf,

    /// Start page of the portal; relative links resolve against it.
    pub portal_url: String,

    #[serde(default)]
    pub overwrite: bool,

    /// Minister name looked up in serving schedules.
    #[serde(default)]
    pub search_name: Option<String>,

    #[serde(default)]
    pub selection: UserSelection,

    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// On-disk encodings accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.yaml`/`.yml`
    /// is read as JSON.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}
