//! HTML parsing for directory listing pages: ASN extraction and page count detection.

use crate::directory::selectors::{listing, pagination};
use regex_lite::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Records per listing page. The site does not advertise its page size.
pub const RECORDS_PER_PAGE: u64 = 1000;

/// Marker inside the pagination span that carries the total record count.
const TOTAL_MARKER: &str = "总共";

/// Display-text prefix of every ASN link.
const ASN_PREFIX: &str = "AS";

static TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"总共(\d+)条").unwrap());

static TRAILING_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/(\d+)$").unwrap());

/// Extracts ASN numbers from a listing page, in document order.
///
/// Links whose text does not start with `AS` are skipped. The remainder is
/// kept verbatim: no trimming, no numeric check, no deduplication.
pub fn extract_asns(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&listing::ASN_LINK)
        .filter_map(|link| {
            let text = link.text().collect::<String>();
            match text.strip_prefix(ASN_PREFIX) {
                Some(number) => Some(number.to_string()),
                None => {
                    trace!("Skipping link text without AS prefix: {:?}", text);
                    None
                }
            }
        })
        .collect()
}

/// Detects how many pages a listing spans from its first page.
///
/// Tries the total-record label first, then the first enabled pagination
/// link showing `>`. Falls back to a single page when neither is present.
/// Always returns at least 1.
pub fn total_pages(html: &str) -> u32 {
    let document = Html::parse_document(html);

    if let Some(total) = parse_total_records(&document) {
        let pages = pages_for_total(total, RECORDS_PER_PAGE).max(1);
        debug!("Total label reports {} records ({} pages)", total, pages);
        return pages;
    }

    if let Some(page) = parse_next_link_page(&document) {
        debug!("Next-page link points at page {}", page);
        return page.max(1);
    }

    debug!("No pagination signal, assuming a single page");
    1
}

/// Ceiling division of a record count into pages.
pub fn pages_for_total(total: u64, per_page: u64) -> u32 {
    if per_page == 0 {
        return 1;
    }
    u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX)
}

/// Reads the record count from the first pagination span containing the total marker.
fn parse_total_records(document: &Html) -> Option<u64> {
    let text = document
        .select(&pagination::SPAN)
        .map(|span| span.text().collect::<String>())
        .find(|text| text.contains(TOTAL_MARKER))?;

    TOTAL_RE.captures(&text)?.get(1)?.as_str().parse().ok()
}

/// Reads the trailing page number from the first enabled pagination link, if it is a "next" link.
///
/// Only the first enabled link is considered. Its number is the linked page,
/// which is not necessarily the last one.
fn parse_next_link_page(document: &Html) -> Option<u32> {
    let link = document.select(&pagination::ENABLED_LINK).next()?;

    let text = link.text().collect::<String>();
    if !text.contains('>') {
        return None;
    }

    let href = link.value().attr("href").unwrap_or_default();
    TRAILING_PAGE_RE.captures(href)?.get(1)?.as_str().parse().ok()
}
