//! Client configuration.

use std::time::Duration;

use crate::DirectoryUrl;

/// Public StackExchange users endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.stackexchange.com/2.2/users";

/// Site queried on the StackExchange network.
pub const DEFAULT_SITE: &str = "stackoverflow";

/// Records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`RemoteDirectoryClient`](crate::RemoteDirectoryClient).
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Users endpoint.
    pub endpoint: DirectoryUrl,
    /// StackExchange site parameter.
    pub site: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl DirectoryConfig {
    /// Configuration for the given endpoint with default settings.
    pub fn new(endpoint: DirectoryUrl) -> Self {
        Self {
            endpoint,
            site: DEFAULT_SITE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the site parameter.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the page size. Zero falls back to the default.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        // DEFAULT_ENDPOINT is a valid https URL
        let endpoint = DirectoryUrl::new(DEFAULT_ENDPOINT).expect("default endpoint is valid");
        Self::new(endpoint)
    }
}
