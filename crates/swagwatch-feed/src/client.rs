//! HTTP client for the announcing account's post timeline.
//!
//! Issues one bearer-authenticated `GET /2/users/{id}/tweets` per call,
//! asking for `created_at` metadata. Anything other than `200 OK` is surfaced
//! as [`FeedError::UnexpectedStatus`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use swagwatch_core::{Announcement, AppConfig};

use crate::error::FeedError;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";

/// Source of recent announcements, newest first.
#[async_trait]
pub trait AnnouncementFeed: Send + Sync {
    async fn recent_announcements(&self) -> Result<Vec<Announcement>, FeedError>;
}

/// Which account to read and how many posts to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery {
    pub user_id: u64,
    pub max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    /// Absent when the account has no posts in range.
    #[serde(default)]
    data: Vec<PostRecord>,
}

#[derive(Debug, Deserialize)]
struct PostRecord {
    #[serde(default)]
    id: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<PostRecord> for Announcement {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            raw_text: record.text,
            posted_at: record.created_at,
        }
    }
}

/// Client for the feed provider's timeline endpoint.
///
/// Use [`FeedClient::new`] for production or [`FeedClient::with_base_url`] to
/// point at a mock server in tests.
pub struct FeedClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
    query: FeedQuery,
}

impl FeedClient {
    /// Creates a client pointed at the production feed API.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        bearer_token: &str,
        query: FeedQuery,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        Self::with_base_url(bearer_token, query, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`FeedClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Self::with_base_url(
            &config.feed_bearer_token,
            FeedQuery {
                user_id: config.feed_user_id,
                max_results: config.feed_max_results,
            },
            config.request_timeout_secs,
            &config.user_agent,
            &config.feed_base_url,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        bearer_token: &str,
        query: FeedQuery,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FeedError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url,
            query,
        })
    }

    fn timeline_url(&self) -> Result<Url, FeedError> {
        let mut url = self
            .base_url
            .join(&format!("2/users/{}/tweets", self.query.user_id))
            .map_err(|e| FeedError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("tweet.fields", "created_at")
            .append_pair("max_results", &self.query.max_results.to_string());
        Ok(url)
    }
}

#[async_trait]
impl AnnouncementFeed for FeedClient {
    /// Fetches the account's most recent posts.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::UnexpectedStatus`] on any status other than `200 OK`.
    /// - [`FeedError::Deserialize`] if the body does not match the expected shape.
    async fn recent_announcements(&self) -> Result<Vec<Announcement>, FeedError> {
        let url = self.timeline_url()?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "feed response status");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TimelineResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: format!("timeline of user {}", self.query.user_id),
                source: e,
            })?;

        Ok(parsed.data.into_iter().map(Announcement::from).collect())
    }
}
