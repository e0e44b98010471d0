//! Document download collaborator.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::error::FetchError;
use crate::sanitize::redact_url;

const DIRECT_TIMEOUT: Duration = Duration::from_secs(30);
const SESSION_TIMEOUT: Duration = Duration::from_secs(60);
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Session cookies of the logged-in portal session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAuth {
    pub cookies: Vec<(String, String)>,
}

impl SessionAuth {
    pub fn new(cookies: Vec<(String, String)>) -> Self {
        Self { cookies }
    }

    /// `name=value; name=value`, or `None` with no cookies.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Which transport produced the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    Direct,
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub transport: Transport,
}

pub trait Fetcher {
    fn fetch(&self, url: &str, auth: &SessionAuth) -> Result<Fetched, FetchError>;
}

/// Plain GET first; on any failure, a second GET carrying the browser
/// session's cookies.
pub struct HttpFetcher {
    direct: Client,
    session: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let direct = Client::builder()
            .timeout(DIRECT_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        let session = Client::builder()
            .timeout(SESSION_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { direct, session })
    }

    fn fetch_direct(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.direct.get(url).send().map_err(|e| FetchError::Request {
            url: redact_url(url),
            source: e,
        })?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url: redact_url(url),
                status: response.status().as_u16(),
            });
        }
        read_body(url, response)
    }

    fn fetch_with_session(&self, url: &str, auth: &SessionAuth) -> Result<Vec<u8>, FetchError> {
        let mut request = self.session.get(url).header(USER_AGENT, BROWSER_USER_AGENT);
        if let Some(cookie) = auth.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().map_err(|e| FetchError::Request {
            url: redact_url(url),
            source: e,
        })?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: redact_url(url),
                status: response.status().as_u16(),
            });
        }
        read_body(url, response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, auth: &SessionAuth) -> Result<Fetched, FetchError> {
        validate_url(url)?;

        match self.fetch_direct(url) {
            Ok(bytes) => {
                return Ok(Fetched {
                    bytes,
                    transport: Transport::Direct,
                })
            }
            Err(e) => debug!("Direct download failed, retrying with session: {}", e),
        }

        match self.fetch_with_session(url, auth) {
            Ok(bytes) => Ok(Fetched {
                bytes,
                transport: Transport::Session,
            }),
            Err(e) => {
                warn!("Download failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Requires an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: redact_url(url),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: redact_url(url),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn read_body(url: &str, response: reqwest::blocking::Response) -> Result<Vec<u8>, FetchError> {
    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| FetchError::Request {
            url: redact_url(url),
            source: e,
        })
}
