//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::directory::CountryCode;
use crate::format::DEFAULT_OUTPUT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default directory site.
pub const DEFAULT_BASE_URL: &str = "https://www.pdflibr.com";

/// Browser User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Country/region to crawl
    #[serde(default)]
    pub country: CountryCode,

    /// Root URL of the directory site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Requested output path
    #[serde(default = "default_output")]
    pub output: String,

    /// First page to fetch
    #[serde(default = "default_start_page")]
    pub start_page: u32,

    /// Last page to fetch; detected from the first page when unset
    #[serde(default)]
    pub end_page: Option<u32>,

    /// Pause between page requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Format of the run summary
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_start_page() -> u32 {
    1
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country: CountryCode::default(),
            base_url: default_base_url(),
            output: default_output(),
            start_page: default_start_page(),
            end_page: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            user_agent: default_user_agent(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("asn-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Invalid values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(country) = std::env::var("ASN_COUNTRY") {
            if let Ok(c) = country.parse() {
                self.country = c;
            }
        }

        if let Ok(base) = std::env::var("ASN_BASE_URL") {
            if !base.trim().is_empty() {
                self.base_url = base;
            }
        }

        if let Ok(delay) = std::env::var("ASN_DELAY") {
            if let Ok(ms) = parse_delay_secs(&delay) {
                self.delay_ms = ms;
            }
        }

        if let Ok(proxy) = std::env::var("ASN_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }
}

/// Parses a delay given in (fractional) seconds into milliseconds.
pub fn parse_delay_secs(s: &str) -> Result<u64, String> {
    let secs: f64 = s.trim().parse().map_err(|_| format!("Invalid delay: {}", s))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("Delay must be a non-negative number of seconds: {}", s));
    }
    Ok((secs * 1000.0).round() as u64)
}

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
