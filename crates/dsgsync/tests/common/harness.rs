//! Test harness for running the download pipeline in isolation.
//!
//! `TestHarness` owns a temporary DSG root. `FakePortal` stands in for the
//! browser session and `RecordingFetcher` for the network.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;
use url::Url;

use dsgsync::error::{FetchError, NavigationError};
use dsgsync::fetch::{Fetched, Fetcher, SessionAuth, Transport};
use dsgsync::pipeline::{PageLink, PageNavigator, PageSection, Pipeline, PipelineConfig, RunReport};
use dsgsync::selection::UserSelection;

pub const PORTAL: &str = "https://portal.example/";

/// Portal pages keyed by listing heading and absolute page URL.
#[derive(Default, Clone)]
pub struct FakePortal {
    listings: HashMap<String, Vec<PageLink>>,
    pages: HashMap<String, Vec<PageSection>>,
    cookies: Vec<(String, String)>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a month link under `heading` whose page holds `sections`.
    pub fn month(mut self, heading: &str, text: &str, href: &str, sections: Vec<PageSection>) -> Self {
        self.listings
            .entry(heading.to_string())
            .or_default()
            .push(PageLink::new(text, href));
        let url = Url::parse(PORTAL)
            .and_then(|base| base.join(href))
            .expect("valid page href");
        self.pages.insert(url.to_string(), sections);
        self
    }

    /// Adds a month link whose page cannot be opened.
    pub fn dead_link(mut self, heading: &str, text: &str, href: &str) -> Self {
        self.listings
            .entry(heading.to_string())
            .or_default()
            .push(PageLink::new(text, href));
        self
    }

    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.push((name.to_string(), value.to_string()));
        self
    }
}

impl PageNavigator for FakePortal {
    fn listing(&self, heading: &str) -> Result<Vec<PageLink>, NavigationError> {
        self.listings
            .get(heading)
            .cloned()
            .ok_or_else(|| NavigationError::RegionNotFound(heading.to_string()))
    }

    fn sections(&self, url: &str) -> Result<Vec<PageSection>, NavigationError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| NavigationError::OpenPage {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
    }

    fn auth(&self) -> Result<SessionAuth, NavigationError> {
        Ok(SessionAuth::new(self.cookies.clone()))
    }
}

/// Serves the URL itself as the document body and records every request.
#[derive(Default, Clone)]
pub struct RecordingFetcher {
    pub requests: Rc<RefCell<Vec<String>>>,
    pub failing: Vec<String>,
}

impl Fetcher for RecordingFetcher {
    fn fetch(&self, url: &str, _auth: &SessionAuth) -> Result<Fetched, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        if self.failing.iter().any(|f| f == url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(Fetched {
            bytes: url.as_bytes().to_vec(),
            transport: Transport::Direct,
        })
    }
}

pub struct TestHarness {
    temp_dir: TempDir,
    pub base_dir: PathBuf,
    pub fetcher: RecordingFetcher,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_dir = temp_dir.path().join("DSGs");
        Self {
            temp_dir,
            base_dir,
            fetcher: RecordingFetcher::default(),
        }
    }

    pub fn pipeline(&self, selection: &UserSelection, overwrite: bool) -> Pipeline {
        let config = PipelineConfig {
            base_dir: self.base_dir.clone(),
            portal_url: Url::parse(PORTAL).expect("valid portal url"),
            overwrite,
            selection: selection.clone(),
        };
        Pipeline::new(config, Box::new(self.fetcher.clone()))
    }

    pub fn run(&self, portal: &FakePortal, selection: &UserSelection) -> RunReport {
        self.pipeline(selection, false)
            .run(portal)
            .expect("pipeline run failed")
    }

    pub fn requests(&self) -> Vec<String> {
        self.fetcher.requests.borrow().clone()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Every file and directory under the base dir, relative and sorted.
    pub fn tree(&self) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = walkdir::WalkDir::new(&self.base_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter_map(|e| e.path().strip_prefix(&self.base_dir).ok().map(Path::to_path_buf))
            .collect();
        entries.sort();
        entries
    }
}
