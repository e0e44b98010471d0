pub mod filter;
pub mod schema;

pub use filter::{included, required_subfolders, schedule_link_included};
pub use schema::{ContentType, Rgb, ScheduleGroup, UserSelection};
