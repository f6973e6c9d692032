//! Data model types.
//!
//! These types describe the records fetched from the remote directory, the
//! requests that fetch them and the snapshot handed to the presentation layer.

mod connectivity;
mod diagnostics;
mod page;
mod record;
mod state;

pub use connectivity::{Connectivity, ConnectivitySignal};
pub use diagnostics::ErrorContext;
pub use page::{PageRequest, PageResult, SequenceId};
pub use record::UserRecord;
pub use state::VisibleListState;
