use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("page has no <article> element")]
    MissingArticle,

    #[error("article has no <table> element")]
    MissingTable,

    #[error("no table row is labelled \"Swag Code\"")]
    MissingSwagCodeRow,

    #[error("swag code cell is empty")]
    EmptyValue,
}

impl ScrapeError {
    /// `true` for transport and status failures, `false` for page-structure failures.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}
