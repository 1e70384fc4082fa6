//! world-airport-codes.com lookup client.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::{AirportCode, CountryCode};

use super::error::AirportError;

/// Default base URL of the airport search site.
const DEFAULT_BASE_URL: &str = "https://www.world-airport-codes.com/";

/// User agent sent with every lookup.
const USER_AGENT: &str = "rtw-planner";

/// The airport header paragraph, e.g. `<p>(Prague, Czech Republic (CZ))</p>`.
static HEADER_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="header clearfix">.*?<p[^>]*>([^<]*)</p>"#)
        .expect("header regex is valid")
});

/// A two-character code in parentheses, e.g. `(CZ)`.
static COUNTRY_IN_PARENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\w\w)\)").expect("country regex is valid")
});

/// Anything that can tell which country an airport is in.
///
/// This abstraction allows country resolution to be tested without the
/// network.
#[allow(async_fn_in_trait)]
pub trait CountryLookup {
    /// Returns the airport's country, or `None` if the source doesn't know it.
    async fn lookup_country(
        &self,
        airport: AirportCode,
    ) -> Result<Option<CountryCode>, AirportError>;
}

/// Configuration for the airport lookup client.
#[derive(Debug, Clone)]
pub struct AirportClientConfig {
    /// Base URL of the site, with trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per airport before giving up
    pub attempts: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl AirportClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the number of attempts and the pause between them.
    pub fn with_retries(mut self, attempts: u32, retry_delay: Duration) -> Self {
        self.attempts = attempts;
        self.retry_delay = retry_delay;
        self
    }
}

impl Default for AirportClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            attempts: 5,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Client that scrapes airport countries from world-airport-codes.com.
#[derive(Debug, Clone)]
pub struct AirportClient {
    http: reqwest::Client,
    base_url: String,
    attempts: u32,
    retry_delay: Duration,
}

impl AirportClient {
    /// Create a new lookup client.
    pub fn new(config: AirportClientConfig) -> Result<Self, AirportError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            attempts: config.attempts.max(1),
            retry_delay: config.retry_delay,
        })
    }

    /// Returns the search page URL for an airport.
    pub fn search_url(&self, airport: AirportCode) -> String {
        format!(
            "{}search/?s={}",
            self.base_url,
            airport.as_str().to_ascii_lowercase()
        )
    }

    /// Fetch the search page, retrying failed attempts.
    async fn fetch_page(&self, airport: AirportCode) -> Result<String, AirportError> {
        let url = self.search_url(airport);
        let mut attempt = 1;

        loop {
            match self.try_fetch(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.attempts => {
                    warn!(
                        airport = %airport,
                        attempt,
                        error = %e,
                        "airport lookup failed, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, AirportError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AirportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl CountryLookup for AirportClient {
    async fn lookup_country(
        &self,
        airport: AirportCode,
    ) -> Result<Option<CountryCode>, AirportError> {
        let page = self.fetch_page(airport).await?;
        let country = parse_country_code(&page);
        debug!(airport = %airport, country = ?country, "airport looked up");
        Ok(country)
    }
}

/// Extract the country code from an airport search results page.
///
/// The code is the parenthesised pair in the first paragraph of the page
/// header. Returns `None` if the page has no such header or the code is not
/// a valid country code.
pub fn parse_country_code(page: &str) -> Option<CountryCode> {
    let paragraph = HEADER_PARAGRAPH.captures(page)?.get(1)?.as_str();
    let code = COUNTRY_IN_PARENS.captures(paragraph)?.get(1)?.as_str();
    CountryCode::parse(code).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PRAGUE_PAGE: &str = r#"<html><body>
        <div class="header clearfix">
            <h1>Václav Havel Airport Prague</h1>
            <p>(Prague, Czech Republic (CZ))</p>
        </div>
        <p>Other paragraph (GB)</p>
    </body></html>"#;

    fn prg() -> AirportCode {
        AirportCode::parse("PRG").unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = AirportClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.attempts, 5);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn config_with_base_url_adds_slash() {
        let config = AirportClientConfig::default().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080/");
    }

    #[test]
    fn search_url_uses_lowercase_code() {
        let client = AirportClient::new(AirportClientConfig::default()).unwrap();
        assert_eq!(
            client.search_url(prg()),
            "https://www.world-airport-codes.com/search/?s=prg"
        );
    }

    #[test]
    fn parses_country_from_header() {
        assert_eq!(
            parse_country_code(PRAGUE_PAGE),
            Some(CountryCode::parse("CZ").unwrap())
        );
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(parse_country_code("<html><p>(Nowhere (XX))</p></html>"), None);
        assert_eq!(parse_country_code(""), None);
    }

    #[test]
    fn header_without_code_yields_none() {
        let page = r#"<div class="header clearfix"><p>(Somewhere, Unknown)</p></div>"#;
        assert_eq!(parse_country_code(page), None);
    }

    #[test]
    fn invalid_code_yields_none() {
        let page = r#"<div class="header clearfix"><p>(Somewhere (c1))</p></div>"#;
        assert_eq!(parse_country_code(page), None);
    }

    #[tokio::test]
    async fn lookup_country_from_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search/").query_param("s", "prg");
                then.status(200).body(PRAGUE_PAGE);
            })
            .await;

        let config = AirportClientConfig::default().with_base_url(server.url("/"));
        let client = AirportClient::new(config).unwrap();

        let country = client.lookup_country(prg()).await.unwrap();
        assert_eq!(country, Some(CountryCode::parse("CZ").unwrap()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn lookup_retries_then_fails() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search/");
                then.status(503).body("busy");
            })
            .await;

        let config = AirportClientConfig::default()
            .with_base_url(server.url("/"))
            .with_retries(3, Duration::from_millis(1));
        let client = AirportClient::new(config).unwrap();

        let result = client.lookup_country(prg()).await;
        assert!(matches!(result, Err(AirportError::Api { status: 503, .. })));
        assert_eq!(mock.hits_async().await, 3);
    }
}
