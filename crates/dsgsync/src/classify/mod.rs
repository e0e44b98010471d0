//! Link classification engine.
//!
//! Every function in here is pure: the same link, text and header always
//! produce the same flags, date, category and destination, which is what
//! makes re-running a download idempotent.

pub mod category;
pub mod date;
pub mod filename;
pub mod flags;
pub mod href;
pub mod mapper;

pub use category::{classify, classify_detailed, Category, Classification, MatchedRule, Signal};
pub use date::{resolve, DateSource, ResolvedDate};
pub use filename::{compose, compose_with_source, sanitize};
pub use flags::{detect, Flags, Language};
pub use href::Href;
pub use mapper::{map, DestinationMapper, DestinationPath, LinkCandidate, Mapping};
