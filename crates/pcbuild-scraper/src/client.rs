use std::time::Duration;

use pcbuild_core::AppConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::{redirect, Client};

use crate::error::ScraperError;

/// Upper bound on the TCP/TLS connect phase, independent of the overall
/// request timeout.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// HTTP client used to download retailer search pages.
///
/// Sends a desktop-browser header set because the retailers serve a
/// stripped or blocked page to obvious bots. Cloning is cheap; all clones
/// share one connection pool.
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: Client,
}

impl PriceClient {
    /// Creates a `PriceClient` with the given request timeout, `User-Agent`
    /// and redirect cap.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_redirects: usize,
    ) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(
                timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
            ))
            .redirect(redirect::Policy::limited(max_redirects))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a `PriceClient` from the scraper settings in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`PriceClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_redirects,
        )
    }

    /// Downloads `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network failure, timeout, redirect-cap
    ///   overflow or an undecodable body.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_with_zero_redirects() {
        assert!(PriceClient::new(5, "pcbuild-test/0.1", 0).is_ok());
    }

    #[test]
    fn from_config_uses_scraper_settings() {
        let config = AppConfig {
            env: pcbuild_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_owned(),
            scraper_request_timeout_secs: 3,
            scraper_max_redirects: 2,
            scraper_user_agent: pcbuild_core::DEFAULT_SCRAPER_USER_AGENT.to_owned(),
        };
        assert!(PriceClient::from_config(&config).is_ok());
    }
}
