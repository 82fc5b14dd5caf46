use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required message field was empty when building the email.
    #[error("{0} is a required field needed to send the email message")]
    MissingField(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email provider returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid email API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
