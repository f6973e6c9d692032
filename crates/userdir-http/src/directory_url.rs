//! Users endpoint URL.

use std::fmt;
use url::Url;

use userdir_core::{InvalidInputError, Result};

/// A validated users endpoint.
///
/// The URL must be absolute, name a resource path, and use HTTPS (HTTP is
/// accepted for localhost so tests and local proxies work). Query and
/// fragment are rejected because the client owns the query string. A
/// trailing slash on the path is dropped.
///
/// # Example
///
/// ```
/// use userdir_http::DirectoryUrl;
///
/// let url = DirectoryUrl::new("https://api.stackexchange.com/2.2/users/").unwrap();
/// assert_eq!(url.as_str(), "https://api.stackexchange.com/2.2/users");
/// assert_eq!(url.host(), "api.stackexchange.com");
/// assert_eq!(url.port(), 443);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectoryUrl {
    url: Url,
    host: String,
    port: u16,
}

impl DirectoryUrl {
    /// Parse and normalize a users endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Endpoint`] naming the rejected value.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        let reject = |reason: &str| InvalidInputError::Endpoint {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(s).map_err(|e| reject(&e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(reject("must be an absolute URL").into());
        }

        let host = match url.host_str() {
            Some(host) => host.trim_start_matches('[').trim_end_matches(']').to_string(),
            None => return Err(reject("must have a host").into()),
        };

        let is_localhost = matches!(host.as_str(), "localhost" | "127.0.0.1" | "::1");
        match url.scheme() {
            "https" => {}
            "http" if is_localhost => {}
            _ => return Err(reject("must use HTTPS (HTTP allowed only for localhost)").into()),
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(reject("must not carry a query or fragment; paging is set per request").into());
        }

        let path = url.path().trim_end_matches('/').to_string();
        if path.is_empty() {
            return Err(reject("must name the users resource, e.g. /2.2/users").into());
        }
        url.set_path(&path);

        let port = url
            .port_or_known_default()
            .ok_or_else(|| reject("has no port"))?;

        Ok(Self { url, host, port })
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Host name, without IPv6 brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, or the scheme default.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for DirectoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let url = DirectoryUrl::new("https://api.stackexchange.com/2.2/users").unwrap();
        assert_eq!(url.host(), "api.stackexchange.com");
        assert_eq!(url.port(), 443);
    }

    #[test]
    fn valid_localhost_http() {
        let url = DirectoryUrl::new("http://localhost:8080/users").unwrap();
        assert_eq!(url.host(), "localhost");
        assert_eq!(url.port(), 8080);

        let url = DirectoryUrl::new("http://[::1]:9000/users").unwrap();
        assert_eq!(url.host(), "::1");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let url = DirectoryUrl::new("https://api.stackexchange.com/2.2/users///").unwrap();
        assert_eq!(url.as_str(), "https://api.stackexchange.com/2.2/users");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(DirectoryUrl::new("http://api.stackexchange.com/2.2/users").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(DirectoryUrl::new("/2.2/users").is_err());
    }

    #[test]
    fn rejects_query_and_fragment() {
        let err = DirectoryUrl::new("https://api.stackexchange.com/2.2/users?site=superuser")
            .unwrap_err();
        assert!(err.to_string().contains("query"));
        assert!(DirectoryUrl::new("https://api.stackexchange.com/2.2/users#top").is_err());
    }

    #[test]
    fn rejects_bare_host() {
        let err = DirectoryUrl::new("https://api.stackexchange.com/").unwrap_err();
        assert!(err.to_string().contains("users resource"));
    }

    #[test]
    fn error_names_the_endpoint() {
        let err = DirectoryUrl::new("ftp://example.com/users").unwrap_err();
        assert!(err.to_string().contains("ftp://example.com/users"));
    }
}
