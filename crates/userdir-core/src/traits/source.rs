//! Directory source trait.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::PageResult;

/// Something that can fetch one page of the remote directory.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch the given page (starting at 1), ordered by reputation descending.
    async fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError>;
}

#[async_trait]
impl<T: DirectorySource + ?Sized> DirectorySource for std::sync::Arc<T> {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError> {
        (**self).fetch_page(page).await
    }
}
