//! Crawl command implementation.

use crate::config::Config;
use crate::directory::{
    extract_asns, total_pages, CrawlOutcome, CrawlReport, DirectoryClient, DirectoryFetch,
};
use crate::format::{output_path, render_script};
use anyhow::{Context, Result};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Crawls every listing page of a country and writes the num-list script.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the crawl against the configured site.
    pub async fn execute(&self) -> Result<CrawlOutcome> {
        let client = DirectoryClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the crawl with a provided client (for testing).
    ///
    /// A non-200 first page yields [`CrawlOutcome::Aborted`] and writes
    /// nothing. Later pages that fail are skipped.
    pub async fn execute_with_client(&self, client: &impl DirectoryFetch) -> Result<CrawlOutcome> {
        let country = &self.config.country;
        let start_page = self.config.start_page.max(1);

        let first = client
            .page(country, start_page)
            .await
            .with_context(|| format!("Failed to fetch page {}", start_page))?;
        info!("Fetched page: {}", first.url);

        if !first.is_ok() {
            error!("Failed to fetch page: {}, status: {}", first.url, first.status);
            return Ok(CrawlOutcome::Aborted { url: first.url, status: first.status });
        }

        let end_page = match self.config.end_page {
            Some(end) => end,
            None => {
                let detected = total_pages(&first.body);
                info!("Detected {} total pages", detected);
                detected
            }
        };

        let mut records = extract_asns(&first.body);
        info!("Page {} yielded {} ASNs", start_page, records.len());

        let mut pages_fetched = 1;
        let mut skipped_pages = Vec::new();

        for page in start_page.saturating_add(1)..=end_page {
            self.delay().await;

            let fetched = match client.page(country, page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!("Error while fetching page {}: {:#}", page, e);
                    skipped_pages.push(page);
                    continue;
                }
            };
            info!("Fetched page: {}", fetched.url);

            if !fetched.is_ok() {
                warn!("Failed to fetch page: {}, status: {}", fetched.url, fetched.status);
                skipped_pages.push(page);
                continue;
            }

            let asns = extract_asns(&fetched.body);
            info!("Page {} yielded {} ASNs", page, asns.len());
            records.extend(asns);
            pages_fetched += 1;
        }

        let path = output_path(&self.config.output, country);
        let script = render_script(country, &records);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::write(&path, script)
            .await
            .with_context(|| format!("Failed to write script: {}", path.display()))?;

        info!("Extracted {} ASNs in total, saved to {}", records.len(), path.display());

        Ok(CrawlOutcome::Written(CrawlReport {
            country: country.to_string(),
            list_name: country.list_name(),
            start_page,
            end_page,
            pages_fetched,
            skipped_pages,
            records: records.len(),
            output: path,
        }))
    }

    /// Returns the pause before the next page: the base delay plus random jitter.
    fn next_delay_ms(&self) -> u64 {
        let jitter = if self.config.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.config.delay_jitter_ms)
        } else {
            0
        };

        self.config.delay_ms.saturating_add(jitter)
    }

    /// Sleeps between page requests, with optional jitter.
    async fn delay(&self) {
        let total_delay = self.next_delay_ms();
        if total_delay == 0 {
            return;
        }

        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}
