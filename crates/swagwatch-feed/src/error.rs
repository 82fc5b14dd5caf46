use thiserror::Error;

/// Errors returned while querying the announcement feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with anything other than `200 OK`.
    #[error("feed request returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feed base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors returned while extracting structured data from announcement text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("announcement text does not match the reward pattern")]
    NoMatch,

    #[error("invalid reward amount: {0}")]
    InvalidAmount(String),

    #[error("invalid expiry time: {0}")]
    InvalidTime(String),

    #[error("unknown time zone abbreviation: {0}")]
    UnknownTimeZone(String),

    #[error("announcement text does not contain a page URL")]
    MissingUrl,

    #[error("invalid reward pattern: {0}")]
    InvalidPattern(String),
}
