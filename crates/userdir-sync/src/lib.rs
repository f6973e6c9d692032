//! userdir-sync - List synchronization and mutation overlay engine.
//!
//! [`ListSyncEngine`] is the synchronous state machine: it owns the
//! [`VisibleListState`](userdir_core::VisibleListState), issues sequenced
//! [`PageRequest`](userdir_core::PageRequest)s and admits only the latest
//! completion. [`SyncDriver`] runs it on a single tokio task, spawning the
//! fetches and marshalling their results back onto that task.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use userdir_core::DirectorySource;
//! use userdir_sync::SyncDriver;
//!
//! # async fn example(source: Arc<dyn DirectorySource>) {
//! let (handle, _task) = SyncDriver::spawn(source);
//! handle.search("ada");
//! let mut snapshots = handle.subscribe();
//! while snapshots.changed().await.is_ok() {
//!     let state = snapshots.borrow_and_update().clone();
//!     if !state.is_loading {
//!         println!("{} records", state.records.len());
//!         break;
//!     }
//! }
//! # }
//! ```

pub mod boundary;
pub mod connectivity;
pub mod driver;
pub mod engine;
pub mod filter;
pub mod overlay;
pub mod pagination;
pub mod sequencer;

pub use boundary::{BoundaryState, CrashIsolationBoundary, Rendered, TracingReporter};
pub use connectivity::{ConnectivityListener, ConnectivityMonitor};
pub use driver::{Command, EngineHandle, SyncDriver};
pub use engine::{Admission, ListSyncEngine, Phase};
pub use overlay::MutationOverlay;
pub use pagination::PaginationController;
pub use sequencer::FetchSequencer;
