//! Fetcher trait for retrieving raw source documents.

use async_trait::async_trait;

/// Retrieves the raw text of a document.
///
/// Failures never propagate: implementations log a diagnostic and return
/// `None`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url` as text.
    async fn fetch(&self, url: &str) -> Option<String>;
}
