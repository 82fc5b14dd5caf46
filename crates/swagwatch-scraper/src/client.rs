use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use swagwatch_core::{AppConfig, SwagCode};

use crate::error::ScrapeError;
use crate::html::extract_swag_code;

/// Resolves a companion page URL to the swag code it publishes.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_swag_code(&self, url: &str) -> Result<SwagCode, ScrapeError>;
}

/// Fetches companion pages over HTTP and scrapes them with [`extract_swag_code`].
pub struct PageScraper {
    client: Client,
}

impl PageScraper {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// # Errors
    ///
    /// See [`PageScraper::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        Self::new(config.request_timeout_secs, &config.user_agent)
    }

    /// Issues one GET for `url` and returns the body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] on network failure.
    /// - [`ScrapeError::UnexpectedStatus`] on any non-2xx status.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageSource for PageScraper {
    async fn fetch_swag_code(&self, url: &str) -> Result<SwagCode, ScrapeError> {
        let body = self.fetch_page(url).await?;
        let code = extract_swag_code(&body)?;
        tracing::info!(url, kind = %code.kind, "scraped swag code");
        Ok(code)
    }
}
