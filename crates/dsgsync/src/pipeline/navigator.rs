use crate::error::NavigationError;
use crate::fetch::SessionAuth;

/// Page region listing the monthly Divine Service Prep pages.
pub const DSG_LISTING: &str = "Divine Service Prep";
/// Page region listing the monthly schedule pages.
pub const SCHEDULES_LISTING: &str = "Schedules";

/// An anchor scraped from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLink {
    pub text: String,
    pub href: String,
}

impl PageLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// A titled group of links on a month page (accordion item or schedule
/// section).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSection {
    pub header: String,
    pub links: Vec<PageLink>,
}

impl PageSection {
    pub fn new(header: impl Into<String>, links: Vec<PageLink>) -> Self {
        Self {
            header: header.into(),
            links,
        }
    }
}

/// Logged-in portal session driven by an external browser.
///
/// Implementations are single-session: calls happen one page at a time.
pub trait PageNavigator {
    /// Anchors inside the page region titled `heading` on the start page.
    fn listing(&self, heading: &str) -> Result<Vec<PageLink>, NavigationError>;

    /// Opens a month page and returns its link sections.
    fn sections(&self, url: &str) -> Result<Vec<PageSection>, NavigationError>;

    /// Cookies of the current session, used by the download fallback.
    fn auth(&self) -> Result<SessionAuth, NavigationError>;
}
