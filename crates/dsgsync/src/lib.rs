pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod sanitize;
pub mod schedule;
pub mod selection;
pub mod storage;

pub use classify::{map, Category, DestinationMapper, DestinationPath, Flags, LinkCandidate};
pub use config::{load_config, Config};
pub use error::{
    CalendarError, ConfigError, DsgError, FetchError, NavigationError, Result, ScheduleError,
    StorageError,
};
pub use fetch::{Fetcher, HttpFetcher, SessionAuth};
pub use pipeline::{PageNavigator, Pipeline, PipelineConfig, RunReport};
pub use selection::{included, UserSelection};
