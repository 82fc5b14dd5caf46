//! One fetch-to-notify cycle.
//!
//! `FETCH -> FILTER -> (nothing recent: done) | PARSE -> SCRAPE -> NOTIFY -> done`.
//! No stage is retried. A failure anywhere before NOTIFY is logged with its
//! stage and ends the cycle without sending anything.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use swagwatch_core::{AppConfig, NotificationPayload};
use swagwatch_feed::{
    filter_recent, AnnouncementFeed, AnnouncementParser, FeedClient, PatternParser,
};
use swagwatch_notify::{DeliveryStatus, EmailSender, Notifier, SendGridClient};
use swagwatch_scraper::{PageScraper, PageSource};

/// Production wiring of [`Pipeline`].
pub(crate) type LivePipeline = Pipeline<FeedClient, PageScraper, PatternParser, SendGridClient>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Fetch,
    Parse,
    Scrape,
    Notify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Parse => "parse",
            Stage::Scrape => "scrape",
            Stage::Notify => "notify",
        };
        f.write_str(name)
    }
}

/// How a cycle ended. Only used for logging and tests; the invocation status
/// is the same for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    NoRecentAnnouncement,
    Notified,
    Aborted { stage: Stage },
}

/// Fixed status reported by every invocation, mirroring a function-runtime
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvocationStatus {
    pub status_code: u16,
    pub body: String,
}

impl InvocationStatus {
    pub(crate) fn completed() -> Self {
        Self {
            status_code: 200,
            body: "\"Completed successfully!\"".to_string(),
        }
    }
}

pub(crate) struct Pipeline<F, S, P, E> {
    feed: F,
    pages: S,
    parser: P,
    notifier: Notifier<E>,
    window_minutes: u32,
}

impl LivePipeline {
    /// Builds the HTTP clients for all three collaborators.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Pipeline::new(
            FeedClient::from_config(config)?,
            PageScraper::from_config(config)?,
            PatternParser::default(),
            Notifier::from_config(SendGridClient::from_config(config)?, config),
            config.window_minutes,
        ))
    }
}

impl<F, S, P, E> Pipeline<F, S, P, E>
where
    F: AnnouncementFeed,
    S: PageSource,
    P: AnnouncementParser,
    E: EmailSender,
{
    pub(crate) fn new(
        feed: F,
        pages: S,
        parser: P,
        notifier: Notifier<E>,
        window_minutes: u32,
    ) -> Self {
        Self {
            feed,
            pages,
            parser,
            notifier,
            window_minutes,
        }
    }

    pub(crate) async fn run_cycle(&self) -> CycleOutcome {
        self.run_cycle_at(Utc::now()).await
    }

    /// Runs one cycle with `now` as the reference time for both the recency
    /// window and the expiry's date.
    pub(crate) async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleOutcome {
        let announcements = match self.feed.recent_announcements().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!(stage = %Stage::Fetch, error = %e, "failed to fetch announcements");
                return CycleOutcome::Aborted {
                    stage: Stage::Fetch,
                };
            }
        };
        match serde_json::to_string(&announcements) {
            Ok(dump) => tracing::debug!(
                count = announcements.len(),
                feed = %dump,
                "fetched announcements"
            ),
            Err(e) => tracing::debug!(error = %e, "could not serialize fetched announcements"),
        }

        let recent = filter_recent(&announcements, self.window_minutes, now);
        let Some(announcement) = recent.first() else {
            tracing::info!(
                window_minutes = self.window_minutes,
                "no new announcement in window"
            );
            return CycleOutcome::NoRecentAnnouncement;
        };
        tracing::info!(
            id = %announcement.id,
            posted_at = %announcement.posted_at,
            "new announcement"
        );

        let parsed = self
            .parser
            .parse_reward(&announcement.raw_text, now)
            .and_then(|reward| {
                self.parser
                    .page_url(&announcement.raw_text)
                    .map(|url| (reward, url))
            });
        let (reward, page_url) = match parsed {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!(
                    stage = %Stage::Parse,
                    error = %e,
                    text = %announcement.raw_text,
                    "announcement did not parse"
                );
                return CycleOutcome::Aborted {
                    stage: Stage::Parse,
                };
            }
        };

        let code = match self.pages.fetch_swag_code(&page_url).await {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(
                    stage = %Stage::Scrape,
                    url = %page_url,
                    network = e.is_network(),
                    error = %e,
                    "failed to scrape swag code"
                );
                return CycleOutcome::Aborted {
                    stage: Stage::Scrape,
                };
            }
        };

        match self.notifier.notify(&NotificationPayload { reward, code }).await {
            DeliveryStatus::Sent => CycleOutcome::Notified,
            DeliveryStatus::Failed => CycleOutcome::Aborted {
                stage: Stage::Notify,
            },
        }
    }
}

/// Entry point for one scheduled invocation.
///
/// Always returns [`InvocationStatus::completed`]; the outcome is only logged.
pub(crate) async fn handle_invocation<F, S, P, E>(
    pipeline: &Pipeline<F, S, P, E>,
) -> InvocationStatus
where
    F: AnnouncementFeed,
    S: PageSource,
    P: AnnouncementParser,
    E: EmailSender,
{
    let outcome = pipeline.run_cycle().await;
    tracing::info!(?outcome, "cycle finished");
    InvocationStatus::completed()
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod tests;
