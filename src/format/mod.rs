//! Output formatting: RouterOS num-list scripts and run summaries (table, JSON).

use crate::config::OutputFormat;
use crate::directory::{CountryCode, CrawlReport};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Output path used when the caller does not pick one.
pub const DEFAULT_OUTPUT: &str = "asn_list.rsc";

/// Extension of generated RouterOS scripts.
pub const SCRIPT_EXTENSION: &str = "rsc";

/// Renders a RouterOS script that loads `records` into the country's num-list.
///
/// Each insertion is wrapped in `:do { } on-error={}` so a duplicate or
/// invalid range does not stop the import.
pub fn render_script(country: &CountryCode, records: &[String]) -> String {
    let list_name = country.list_name();
    let mut script = String::with_capacity(64 + records.len() * (list_name.len() + 48));

    let _ = writeln!(script, "/log info \"Loading {} ASN list\"", country.upper());
    script.push_str("/routing filter num-list\n");

    for asn in records {
        let _ = writeln!(script, ":do {{ add list={} range={} }} on-error={{}}", list_name, asn);
    }

    script
}

/// Resolves the script path for a requested output.
///
/// The default request becomes `{CODE}_ASN.rsc`; anything else keeps its
/// stem and gets the `.rsc` extension. A request without a file name
/// (`""`, `out/`) gets `.rsc` appended as-is.
pub fn output_path(requested: &str, country: &CountryCode) -> PathBuf {
    if requested != DEFAULT_OUTPUT {
        let path = Path::new(requested);
        if path.file_name().is_none() || requested.ends_with(std::path::is_separator) {
            return PathBuf::from(format!("{}.{}", requested, SCRIPT_EXTENSION));
        }
        return path.with_extension(SCRIPT_EXTENSION);
    }

    PathBuf::from(format!("{}.{}", country.list_name(), SCRIPT_EXTENSION))
}

/// Formats crawl reports for the console.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a crawl report.
    pub fn format_report(&self, report: &CrawlReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_report(report),
        }
    }

    fn table_report(&self, report: &CrawlReport) -> String {
        let skipped = if report.skipped_pages.is_empty() {
            "none".to_string()
        } else {
            report.skipped_pages.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
        };

        let lines = [
            format!("Country:  {}", report.country.to_uppercase()),
            format!("List:     {}", report.list_name),
            format!("Pages:    {}-{} ({} fetched)", report.start_page, report.end_page, report.pages_fetched),
            format!("Skipped:  {}", skipped),
            format!("Records:  {}", report.records),
            format!("Output:   {}", report.output.display()),
        ];

        lines.join("\n")
    }
}
