use async_trait::async_trait;

use crate::error::ImportError;

mod request;

pub use request::{classify_fetch_error, RequestFetcher};

/// A page retrieved for extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    /// URL after redirects
    pub final_url: String,
    pub status: u16,
}

/// Retrieves the HTML for a URL.
///
/// Implementations return either a body worth extracting from or a
/// classified fetch fault; they never retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ImportError>;
}
