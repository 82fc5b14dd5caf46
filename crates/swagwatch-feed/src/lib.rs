//! Announcement feed access for swagwatch.
//!
//! Queries the announcing account's recent posts, keeps the ones inside the
//! recency window, and extracts the reward amount, expiry and companion page
//! URL from their text.

pub mod client;
pub mod error;
pub mod parse;
pub mod recency;

pub use client::{AnnouncementFeed, FeedClient, FeedQuery};
pub use error::{FeedError, ParseError};
pub use parse::{parse_reward, AnnouncementParser, PatternParser, DEFAULT_REWARD_PATTERN};
pub use recency::{filter_recent, recent_within};
