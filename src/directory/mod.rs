//! ASN directory modules for HTTP access, parsing, and data models.

pub mod client;
pub mod country;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{DirectoryClient, DirectoryFetch};
pub use country::{CountryCode, CountryCodeError};
pub use models::{CrawlOutcome, CrawlReport, FetchedPage};
pub use parser::{extract_asns, total_pages};
