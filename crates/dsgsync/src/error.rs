use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DsgError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("Invalid value for environment variable {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan directory '{path}': {source}")]
    ScanDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Page region '{0}' not found")]
    RegionNotFound(String),

    #[error("Failed to open page {url}: {reason}")]
    OpenPage { url: String, reason: String },

    #[error("Browser session error: {0}")]
    Session(String),
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to read schedule '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse PDF '{path}': {reason}")]
    PdfParse { path: PathBuf, reason: String },

    #[error("Highlighting failed for '{path}': {reason}")]
    Highlight { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Could not parse event start '{input}': {source}")]
    InvalidStart {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Event duration of {hours} hours is out of range")]
    InvalidDuration { hours: f64 },

    #[error("Calendar service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, DsgError>;
