//! asn-crawler - Per-country ASN listing crawler
//!
//! Fetches the paginated ASN table of a country from a public directory site
//! and writes a RouterOS script that loads the numbers into a num-list.

pub mod commands;
pub mod config;
pub mod directory;
pub mod format;

pub use config::Config;
pub use directory::{CountryCode, CrawlOutcome, CrawlReport};
