pub mod filesystem;
pub mod folders;
pub mod scan;

pub use filesystem::{FileStorage, StoreOutcome};
pub use folders::{month_year_pairs_in, years_in, EnsureReport, FolderEnsurer};
pub use scan::{find_schedule_files, is_excluded_schedule_path, schedule_files_for};
