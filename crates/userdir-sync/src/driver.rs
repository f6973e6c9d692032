//! Async runtime shell around [`ListSyncEngine`].
//!
//! A single driver task owns the engine. Fetches run as separate tasks and
//! their results are collected back on the driver task before they touch the
//! visible state, so no locks are involved. Dropping every [`EngineHandle`]
//! tears the driver down and aborts fetches still in flight.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, instrument};
use userdir_core::{
    DirectorySource, FetchError, PageRequest, PageResult, SequenceId, VisibleListState,
};

use crate::engine::{Admission, ListSyncEngine};

/// Inbound events from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SearchTextChanged(String),
    NextPage,
    PrevPage,
    FollowToggle(u64),
    Block(u64),
}

/// Cloneable handle used by the presentation layer.
///
/// Sends commands to the driver and reads the snapshots it publishes.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<VisibleListState>,
}

impl EngineHandle {
    /// Send a command. Returns false if the driver has shut down.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn search(&self, text: impl Into<String>) -> bool {
        self.send(Command::SearchTextChanged(text.into()))
    }

    pub fn next_page(&self) -> bool {
        self.send(Command::NextPage)
    }

    pub fn prev_page(&self) -> bool {
        self.send(Command::PrevPage)
    }

    /// Callback contract for the follow control of a row.
    pub fn request_follow_toggle(&self, id: u64) -> bool {
        self.send(Command::FollowToggle(id))
    }

    /// Callback contract for the block control of a row.
    pub fn request_block(&self, id: u64) -> bool {
        self.send(Command::Block(id))
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> VisibleListState {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<VisibleListState> {
        self.snapshots.clone()
    }
}

type Completion = (SequenceId, Result<PageResult, FetchError>);

/// Drives a [`ListSyncEngine`] against a [`DirectorySource`].
pub struct SyncDriver<S: ?Sized> {
    engine: ListSyncEngine,
    source: Arc<S>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<VisibleListState>,
    fetches: JoinSet<Completion>,
    mount: Option<PageRequest>,
}

impl<S> SyncDriver<S>
where
    S: DirectorySource + ?Sized + 'static,
{
    /// Build a driver and its handle without spawning it.
    ///
    /// The mount fetch is issued here so the first snapshot a handle sees is
    /// already loading; it is dispatched once the driver runs.
    pub fn new(source: Arc<S>, mut engine: ListSyncEngine) -> (Self, EngineHandle) {
        let mount = engine.start();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(engine.state().clone());

        let driver = Self {
            engine,
            source,
            commands: commands_rx,
            snapshots: snapshots_tx,
            fetches: JoinSet::new(),
            mount,
        };
        let handle = EngineHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        };
        (driver, handle)
    }

    /// Spawn a driver starting at page 1 with no filter.
    pub fn spawn(source: Arc<S>) -> (EngineHandle, JoinHandle<()>) {
        Self::spawn_with(source, ListSyncEngine::default())
    }

    /// Spawn a driver for a preconfigured engine.
    pub fn spawn_with(source: Arc<S>, engine: ListSyncEngine) -> (EngineHandle, JoinHandle<()>) {
        let (driver, handle) = Self::new(source, engine);
        let task = tokio::spawn(driver.run());
        (handle, task)
    }

    /// Run until every handle is dropped.
    #[instrument(skip(self), name = "sync_driver")]
    pub async fn run(mut self) {
        if let Some(request) = self.mount.take() {
            self.dispatch(request);
        }

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => {
                        debug!(in_flight = self.fetches.len(), "all handles dropped, detaching");
                        break;
                    }
                },
                Some(joined) = self.fetches.join_next() => match joined {
                    Ok((sequence_id, result)) => {
                        if self.engine.complete(sequence_id, result) == Admission::Admitted {
                            self.publish();
                        }
                    }
                    Err(err) => error!(error = %err, "fetch task did not complete"),
                },
            }
        }

        self.fetches.shutdown().await;
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "command received");
        let request = match command {
            Command::SearchTextChanged(text) => self.engine.on_search_text_change(text),
            Command::NextPage => self.engine.on_next_page(),
            Command::PrevPage => self.engine.on_prev_page(),
            Command::FollowToggle(id) => {
                if self.engine.on_follow_toggle(id) {
                    self.publish();
                }
                return;
            }
            Command::Block(id) => {
                if self.engine.on_block(id) {
                    self.publish();
                }
                return;
            }
        };

        if let Some(request) = request {
            self.dispatch(request);
            self.publish();
        }
    }

    fn dispatch(&mut self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let PageRequest {
            page, sequence_id, ..
        } = request;

        self.fetches.spawn(async move {
            let result = AssertUnwindSafe(source.fetch_page(page))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(FetchError::network("directory source panicked")));
            (sequence_id, result)
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.engine.state().clone());
    }
}
