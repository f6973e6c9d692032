//! Remote directory HTTP client.

use async_trait::async_trait;
use tracing::{debug, instrument, trace, warn};

use userdir_core::{DirectorySource, FetchError, PageResult};

use crate::DirectoryConfig;
use crate::endpoints::{ErrorResponse, ORDER, SORT_BY, UsersQuery, UsersResponse};

/// HTTP client for one page of the remote user directory.
///
/// Each call to [`fetch_page`](RemoteDirectoryClient::fetch_page) issues a
/// single GET. Nothing is retried; the caller decides what a failure means.
#[derive(Debug, Clone)]
pub struct RemoteDirectoryClient {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl RemoteDirectoryClient {
    /// Create a new client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: DirectoryConfig) -> userdir_core::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("userdir/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Fetch one page of users, ordered by reputation descending.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError> {
        let query = UsersQuery {
            page,
            pagesize: self.config.page_size,
            order: ORDER,
            sort: SORT_BY,
            site: &self.config.site,
        };
        debug!(page, "fetching directory page");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(self.config.endpoint.as_url().clone())
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Decode a response into a page, or classify the failure.
    async fn handle_response(&self, response: reqwest::Response) -> Result<PageResult, FetchError> {
        let status = response.status();
        trace!(status = %status, "directory response");

        if !status.is_success() {
            let error = self.parse_error_response(response).await;
            warn!(%error, "directory returned an error status");
            return Err(error);
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let envelope: UsersResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::decode(e.to_string()))?;

        let page = PageResult::from(envelope);
        debug!(records = page.records.len(), has_more = page.has_more, "page decoded");
        Ok(page)
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();

        // The API sends a JSON error envelope; proxies may not.
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.summary(),
            Err(_) => None,
        };

        FetchError::HttpStatus { status, message }
    }
}

#[async_trait]
impl DirectorySource for RemoteDirectoryClient {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError> {
        RemoteDirectoryClient::fetch_page(self, page).await
    }
}

/// Classify a transport-level reqwest failure.
fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        FetchError::network(format!("connection failed: {err}"))
    } else if err.is_decode() {
        FetchError::decode(err.to_string())
    } else {
        FetchError::network(err.to_string())
    }
}
