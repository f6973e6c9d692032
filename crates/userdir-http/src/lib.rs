//! userdir-http - HTTP-backed directory source for userdir.
//!
//! [`RemoteDirectoryClient`] fetches one page of the StackExchange user
//! directory per call and decodes the `{ items, has_more }` envelope into
//! [`userdir_core::PageResult`].

mod client;
mod config;
mod directory_url;
mod endpoints;

pub use client::RemoteDirectoryClient;
pub use config::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, DEFAULT_SITE, DirectoryConfig};
pub use directory_url::DirectoryUrl;
