//! userdir-core - Core types and traits for the userdir directory browser.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, FetchError, InvalidInputError, RenderError};
pub use traits::{DirectorySource, ErrorReporter};
pub use types::{
    Connectivity, ConnectivitySignal, ErrorContext, PageRequest, PageResult, SequenceId,
    UserRecord, VisibleListState,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
