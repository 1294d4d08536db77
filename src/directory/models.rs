//! Data models for fetched pages and crawl results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A fetched listing page. Non-2xx responses are returned as-is.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Requested URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    /// Returns true when the page was served with `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Summary of a completed crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Lowercase country code
    pub country: String,
    /// Generated num-list name
    pub list_name: String,
    /// First page requested
    pub start_page: u32,
    /// Last page requested
    pub end_page: u32,
    /// Pages that returned records (or an empty table)
    pub pages_fetched: u32,
    /// Pages skipped because of a bad status or transport error
    pub skipped_pages: Vec<u32>,
    /// Number of ASN records written
    pub records: usize,
    /// Script file that was written
    pub output: PathBuf,
}

/// Result of a crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The script was written.
    Written(CrawlReport),
    /// The first page did not return `200 OK`; nothing was written.
    Aborted { url: String, status: u16 },
}

impl CrawlOutcome {
    /// Returns the report if the script was written.
    pub fn report(&self) -> Option<&CrawlReport> {
        match self {
            CrawlOutcome::Written(report) => Some(report),
            CrawlOutcome::Aborted { .. } => None,
        }
    }

    /// Returns true when the run stopped at the first page.
    pub fn is_aborted(&self) -> bool {
        matches!(self, CrawlOutcome::Aborted { .. })
    }
}
