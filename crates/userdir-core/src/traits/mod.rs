//! Seams between the engine and its collaborators.

mod reporter;
mod source;

pub use reporter::ErrorReporter;
pub use source::DirectorySource;
