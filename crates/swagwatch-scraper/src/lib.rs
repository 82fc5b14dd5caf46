pub mod client;
pub mod error;
pub mod html;

pub use client::{PageScraper, PageSource};
pub use error::ScrapeError;
pub use html::extract_swag_code;
