pub mod config;
pub mod navigator;
pub mod report;
pub mod runner;

pub use config::PipelineConfig;
pub use navigator::{PageLink, PageNavigator, PageSection, DSG_LISTING, SCHEDULES_LISTING};
pub use report::{FailedItem, RunReport, SavedItem};
pub use runner::Pipeline;
