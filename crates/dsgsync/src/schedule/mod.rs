pub mod calendar;
pub mod extract;
pub mod highlight;
pub mod metadata;
pub mod table;

pub use calendar::{sync_assignments, CalendarService, CalendarSettings, EventSpec, SyncReport};
pub use extract::{PdfTextExtractor, TextExtractor};
pub use highlight::{highlight_schedule_files, is_highlight_candidate, HighlightReport, Highlighter};
pub use metadata::{extract_schedule_metadata, ScheduleMetadata};
pub use table::{city_of, format_display_date, Assignment, ScheduleTable};
