//! asn-crawler - Per-country ASN listing crawler
//!
//! Writes a RouterOS `/routing filter num-list` script for a country's ASNs.

use anyhow::Result;
use asn_crawler::commands::CrawlCommand;
use asn_crawler::config::{parse_delay_secs, Config, OutputFormat};
use asn_crawler::directory::{CountryCode, CrawlOutcome};
use asn_crawler::format::Formatter;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "asn-crawler",
    version,
    about = "Crawl a country's ASN listing and emit a RouterOS num-list script",
    long_about = "Fetches every page of a country's ASN table from a public directory site \
                  and writes a RouterOS script that loads the numbers into {CODE}_ASN."
)]
struct Cli {
    /// Country/region code, e.g. us, cn, jp [default: us]
    #[arg(short = 'C', long)]
    country: Option<CountryCode>,

    /// Output file; any extension is replaced with .rsc [default: {CODE}_ASN.rsc]
    #[arg(short, long)]
    output: Option<String>,

    /// First page to fetch
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    start: Option<u32>,

    /// Last page to fetch; detected from the first page when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    end: Option<u32>,

    /// Delay between page requests in seconds [default: 1.0]
    #[arg(short, long, value_parser = parse_delay_secs)]
    delay: Option<u64>,

    /// Directory site root [default: https://www.pdflibr.com]
    #[arg(short, long)]
    base: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long)]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Summary format: table or json [default: table]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides; ASN_* env vars are read only here
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(country) = cli.country {
        config.country = country;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(start) = cli.start {
        config.start_page = start;
    }
    if cli.end.is_some() {
        config.end_page = cli.end;
    }
    if let Some(delay_ms) = cli.delay {
        config.delay_ms = delay_ms;
    }
    if let Some(base) = cli.base {
        config.base_url = base;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let formatter = Formatter::new(config.format);
    let cmd = CrawlCommand::new(config);

    match cmd.execute().await? {
        CrawlOutcome::Written(report) => {
            println!("{}", formatter.format_report(&report));
            Ok(ExitCode::SUCCESS)
        }
        CrawlOutcome::Aborted { url, status } => {
            eprintln!("No output written: {} returned status {}", url, status);
            Ok(ExitCode::FAILURE)
        }
    }
}
