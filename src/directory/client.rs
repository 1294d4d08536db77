//! HTTP client for the ASN directory using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::directory::country::CountryCode;
use crate::directory::models::FetchedPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching listing pages - enables mocking for tests.
#[async_trait]
pub trait DirectoryFetch: Send + Sync {
    /// Fetches one listing page for a country.
    ///
    /// Any HTTP status is returned in the page; only transport and body
    /// read failures are errors.
    async fn page(&self, country: &CountryCode, page: u32) -> Result<FetchedPage>;
}

/// Builds the listing URL for a page. Page 1 has no trailing page segment.
pub fn page_url(base_url: &str, country: &CountryCode, page: u32) -> String {
    let base = base_url.trim_end_matches('/');
    let code = urlencoding::encode(country.as_str());

    if page == 1 {
        format!("{}/countries/{}", base, code)
    } else {
        format!("{}/countries/{}/{}", base, code, page)
    }
}

/// Directory HTTP client with a fixed browser User-Agent.
pub struct DirectoryClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl DirectoryClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // Emulation headers are client defaults; per-request headers replace them.
        let mut builder = Client::builder()
            .emulation(Emulation::Chrome131)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Returns the configured site root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.text().await.context("Failed to read response body")?;

        Ok(FetchedPage { url: url.to_string(), status, body })
    }
}

#[async_trait]
impl DirectoryFetch for DirectoryClient {
    async fn page(&self, country: &CountryCode, page: u32) -> Result<FetchedPage> {
        let url = page_url(&self.base_url, country, page);
        self.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config(base_url: &str) -> Config {
        Config { base_url: base_url.to_string(), delay_ms: 0, ..Config::default() }
    }

    fn cn() -> CountryCode {
        "cn".parse().unwrap()
    }

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("https://www.pdflibr.com", &cn(), 1), "https://www.pdflibr.com/countries/cn");
        assert_eq!(page_url("https://www.pdflibr.com", &cn(), 2), "https://www.pdflibr.com/countries/cn/2");
        assert_eq!(page_url("https://www.pdflibr.com/", &cn(), 17), "https://www.pdflibr.com/countries/cn/17");
    }

    #[tokio::test]
    async fn test_first_page_has_no_page_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/countries/cn"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>first</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DirectoryClient::new(&make_test_config(&mock_server.uri())).unwrap();
        let page = client.page(&cn(), 1).await.unwrap();

        assert!(page.is_ok());
        assert_eq!(page.url, format!("{}/countries/cn", mock_server.uri()));
        assert!(page.body.contains("first"));
    }

    #[tokio::test]
    async fn test_later_page_appends_number() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/countries/cn/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>page 3</html>"))
            .mount(&mock_server)
            .await;

        let client = DirectoryClient::new(&make_test_config(&mock_server.uri())).unwrap();
        let page = client.page(&cn(), 3).await.unwrap();

        assert_eq!(page.status, 200);
        assert!(page.body.contains("page 3"));
    }

    #[tokio::test]
    async fn test_sends_single_fixed_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/countries/cn/2"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DirectoryClient::new(&make_test_config(&mock_server.uri())).unwrap();
        let page = client.page(&cn(), 2).await.unwrap();
        assert_eq!(page.status, 200);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let agents: Vec<_> = requests[0].headers.get_all("user-agent").iter().collect();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0], DEFAULT_USER_AGENT);
    }

    #[tokio::test]
    async fn test_sends_configured_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/countries/cn"))
            .and(header("user-agent", "asn-crawler-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = make_test_config(&mock_server.uri());
        config.user_agent = "asn-crawler-test/1.0".to_string();

        let client = DirectoryClient::new(&config).unwrap();
        assert!(client.page(&cn(), 1).await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/countries/cn"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let client = DirectoryClient::new(&make_test_config(&mock_server.uri())).unwrap();
        let page = client.page(&cn(), 1).await.unwrap();

        assert_eq!(page.status, 404);
        assert!(!page.is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Nothing listens on port 9 locally
        let client = DirectoryClient::new(&make_test_config("http://127.0.0.1:9")).unwrap();
        let result = client.page(&cn(), 1).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to send request"));
    }

    #[tokio::test]
    async fn test_base_url_kept() {
        let client = DirectoryClient::new(&make_test_config("http://custom.url")).unwrap();
        assert_eq!(client.base_url(), "http://custom.url");
    }
}
