use std::path::PathBuf;

use tracing::{debug, info, info_span, warn};
use url::Url;

use crate::classify::{DestinationMapper, LinkCandidate};
use crate::error::{DsgError, FetchError};
use crate::fetch::{Fetcher, HttpFetcher, SessionAuth};
use crate::sanitize::redact_url;
use crate::selection::{included, required_subfolders, schedule_link_included};
use crate::storage::{FileStorage, FolderEnsurer, StoreOutcome};

use super::config::PipelineConfig;
use super::navigator::{PageLink, PageNavigator, PageSection, DSG_LISTING, SCHEDULES_LISTING};
use super::report::{FailedItem, RunReport, SavedItem};

pub struct Pipeline {
    config: PipelineConfig,
    mapper: DestinationMapper,
    ensurer: FolderEnsurer,
    storage: FileStorage,
    fetcher: Box<dyn Fetcher>,
}

impl Pipeline {
    /// Production constructor: downloads over HTTP.
    pub fn from_config(config: PipelineConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new()?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    /// Constructor with an injected fetcher.
    pub fn new(config: PipelineConfig, fetcher: Box<dyn Fetcher>) -> Self {
        let mapper = DestinationMapper::new(&config.base_dir);
        let ensurer = FolderEnsurer::new(&config.base_dir);
        let storage = FileStorage::new(config.overwrite);
        Self {
            config,
            mapper,
            ensurer,
            storage,
            fetcher,
        }
    }

    /// Downloads every selected document reachable from the portal's
    /// listings. Only failing to prepare the folder tree aborts the run;
    /// page and document failures are collected in the report.
    pub fn run(&self, navigator: &dyn PageNavigator) -> Result<RunReport, DsgError> {
        let portal = redact_url(self.config.portal_url.as_str());
        let _run_span = info_span!("pipeline_run", portal = %portal).entered();
        let mut report = RunReport::default();

        let dsg_months = self.listing(navigator, DSG_LISTING, &mut report);
        let schedule_months = self.listing(navigator, SCHEDULES_LISTING, &mut report);

        {
            let _step = info_span!("ensure_folders").entered();
            let texts: Vec<&str> = dsg_months
                .iter()
                .chain(&schedule_months)
                .map(|link| link.text.as_str())
                .collect();
            let categories = required_subfolders(&self.config.selection);
            let folders = self.ensurer.ensure_listing(texts.as_slice(), &categories)?;
            report.folders_created = folders.created.len();
            report.folders_existing = folders.existing.len();
            info!(
                "Folders ready: {} created, {} existing",
                report.folders_created, report.folders_existing
            );
        }

        let auth = navigator.auth().unwrap_or_else(|e| {
            warn!("No session cookies available: {}", e);
            SessionAuth::default()
        });

        if self.config.selection.content_types.is_empty() {
            info!("No document types selected, skipping {}", DSG_LISTING);
        } else {
            for month in &dsg_months {
                self.process_dsg_month(navigator, month, &auth, &mut report);
            }
        }

        if self.config.selection.schedule_groups.is_empty() {
            info!("No schedules selected for download");
        } else {
            for month in &schedule_months {
                self.process_schedule_month(navigator, month, &auth, &mut report);
            }
        }

        info!(
            "Run finished: {} saved, {} skipped, {} failed, {} filtered",
            report.saved_count(),
            report.skipped_count(),
            report.failed_count(),
            report.filtered
        );
        Ok(report)
    }

    fn listing(&self, navigator: &dyn PageNavigator, heading: &str, report: &mut RunReport) -> Vec<PageLink> {
        match navigator.listing(heading) {
            Ok(links) => links
                .into_iter()
                .filter(|link| !link.href.trim().is_empty())
                .collect(),
            Err(e) => {
                warn!("Could not read {} listing: {}", heading, e);
                report.page_errors.push(format!("{heading}: {e}"));
                Vec::new()
            }
        }
    }

    fn process_dsg_month(
        &self,
        navigator: &dyn PageNavigator,
        month: &PageLink,
        auth: &SessionAuth,
        report: &mut RunReport,
    ) {
        let _span = info_span!("month", listing = DSG_LISTING, month = %month.text).entered();
        let Some(sections) = self.open_month(navigator, month, report) else {
            return;
        };

        for section in sections {
            let header = format!("{} {}", DSG_LISTING, section.header.trim());
            for link in section.links {
                if link.href.trim().is_empty() {
                    report.discarded += 1;
                    continue;
                }

                let candidate = LinkCandidate::new(link.href)
                    .with_text(link.text)
                    .with_header(header.trim())
                    .with_month_year_hint(month.text.clone());

                if !included(&candidate.flags(), &self.config.selection) {
                    debug!("Not selected: {}", redact_url(&candidate.href));
                    report.filtered += 1;
                    continue;
                }

                self.download(&candidate, auth, report);
            }
        }
    }

    fn process_schedule_month(
        &self,
        navigator: &dyn PageNavigator,
        month: &PageLink,
        auth: &SessionAuth,
        report: &mut RunReport,
    ) {
        let _span = info_span!("month", listing = SCHEDULES_LISTING, month = %month.text).entered();
        let Some(sections) = self.open_month(navigator, month, report) else {
            return;
        };

        for section in sections {
            for link in section.links {
                if link.href.trim().is_empty() {
                    report.discarded += 1;
                    continue;
                }
                if !schedule_link_included(&section.header, &link.text, &link.href, &self.config.selection) {
                    report.filtered += 1;
                    continue;
                }

                let candidate = LinkCandidate::new(link.href)
                    .with_text(link.text)
                    .with_header(section.header.trim())
                    .with_month_year_hint(month.text.clone());

                if let Some(path) = self.download(&candidate, auth, report) {
                    report.schedule_files.push(path);
                }
            }
        }
    }

    fn open_month(
        &self,
        navigator: &dyn PageNavigator,
        month: &PageLink,
        report: &mut RunReport,
    ) -> Option<Vec<PageSection>> {
        let url = match self.absolute_url(&month.href) {
            Ok(url) => url,
            Err(e) => {
                report.page_errors.push(format!("{}: {}", month.text, e));
                return None;
            }
        };

        match navigator.sections(url.as_str()) {
            Ok(sections) if sections.is_empty() => {
                info!("No link sections on {}", month.text);
                Some(sections)
            }
            Ok(sections) => Some(sections),
            Err(e) => {
                warn!("Could not open month page {}: {}", month.text, e);
                report.page_errors.push(format!("{}: {}", month.text, e));
                None
            }
        }
    }

    /// Maps, fetches and stores one candidate. Returns the file's path when
    /// it was saved or already present.
    fn download(&self, candidate: &LinkCandidate, auth: &SessionAuth, report: &mut RunReport) -> Option<PathBuf> {
        let mapping = self.mapper.map_detailed(candidate);
        let destination = mapping.destination;
        let category = mapping.classification.category;
        let _span = info_span!("candidate", category = %category, filename = %destination.filename).entered();

        if !self.storage.overwrite() && self.storage.exists(&destination) {
            info!("Skipped (exists): {}", destination.relative().display());
            let path = destination.file_path();
            report.skipped.push(path.clone());
            return Some(path);
        }

        let url = match self.absolute_url(&candidate.href) {
            Ok(url) => url,
            Err(e) => {
                record_failure(report, &candidate.href, &e.to_string());
                return None;
            }
        };

        let fetched = match self.fetcher.fetch(url.as_str(), auth) {
            Ok(fetched) => fetched,
            Err(e) => {
                record_failure(report, url.as_str(), &e.to_string());
                return None;
            }
        };

        match self.storage.store(&destination, &fetched.bytes) {
            Ok(StoreOutcome::Saved(path)) => {
                report.saved.push(SavedItem {
                    path: path.clone(),
                    category,
                    transport: fetched.transport,
                });
                Some(path)
            }
            Ok(StoreOutcome::Skipped(path)) => {
                report.skipped.push(path.clone());
                Some(path)
            }
            Err(e) => {
                record_failure(report, url.as_str(), &e.to_string());
                None
            }
        }
    }

    fn absolute_url(&self, href: &str) -> Result<Url, FetchError> {
        self.config
            .portal_url
            .join(href.trim())
            .map_err(|e| FetchError::InvalidUrl {
                url: redact_url(href),
                reason: e.to_string(),
            })
    }
}

fn record_failure(report: &mut RunReport, href: &str, reason: &str) {
    warn!("Failed: {} ({})", redact_url(href), reason);
    report.failed.push(FailedItem {
        href: redact_url(href),
        reason: reason.to_string(),
    });
}
