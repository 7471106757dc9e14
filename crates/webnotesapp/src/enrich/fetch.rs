use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use std::time::Duration;

use crate::error::{Result, WebnotesError};
use crate::model::Section;

/// Result of one HTTP request, as far as a section cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 200 OK, with the body for GET requests (empty for HEAD).
    Ok(String),
    /// Any other status, as `"<code> <reason>"`.
    Status(String),
    /// The request never got a status.
    Error(String),
}

pub trait Fetcher {
    fn get(&self, url: &str) -> FetchOutcome;
    fn head(&self, url: &str) -> FetchOutcome;
}

pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WebnotesError::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

pub fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Error(e.to_string()),
        };
        if response.status() != StatusCode::OK {
            return FetchOutcome::Status(status_text(response.status()));
        }
        match response.text() {
            Ok(body) => FetchOutcome::Ok(body),
            Err(e) => FetchOutcome::Error(e.to_string()),
        }
    }

    fn head(&self, url: &str) -> FetchOutcome {
        match self.client.head(url).send() {
            Ok(response) if response.status() == StatusCode::OK => FetchOutcome::Ok(String::new()),
            Ok(response) => FetchOutcome::Status(status_text(response.status())),
            Err(e) => FetchOutcome::Error(e.to_string()),
        }
    }
}

/// Records a GET on the section. Returns the page on success; a failed GET
/// leaves the status or error on the section and never clears either.
pub fn record_get(section: &mut Section, outcome: FetchOutcome) -> Option<String> {
    match outcome {
        FetchOutcome::Ok(html) => Some(html),
        FetchOutcome::Status(status) => {
            tracing::warn!(id = section.id(), %status, "fetch failed");
            section.set_status(status);
            None
        }
        FetchOutcome::Error(error) => {
            tracing::warn!(id = section.id(), %error, "fetch failed");
            section.set_error(error);
            None
        }
    }
}

/// Records a HEAD on the section: 200 clears status and error.
pub fn record_head(section: &mut Section, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Ok(_) => section.clear_status(),
        FetchOutcome::Status(status) => {
            tracing::warn!(id = section.id(), %status, "head failed");
            section.set_status(status);
        }
        FetchOutcome::Error(error) => {
            tracing::warn!(id = section.id(), %error, "head failed");
            section.set_error(error);
        }
    }
}
