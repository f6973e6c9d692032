//! Online/offline observer.
//!
//! The monitor only records the last signal and publishes it; nothing in the
//! engine depends on it beyond display.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;
use userdir_core::{Connectivity, ConnectivitySignal};

/// Tracks the most recent online/offline signal.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    status: Arc<watch::Sender<Connectivity>>,
}

impl ConnectivityMonitor {
    pub fn new(initial: Connectivity) -> Self {
        let (status, _) = watch::channel(initial);
        Self {
            status: Arc::new(status),
        }
    }

    pub fn current(&self) -> Connectivity {
        *self.status.borrow()
    }

    /// Apply a signal. Returns true if the status changed.
    pub fn handle(&self, signal: ConnectivitySignal) -> bool {
        let next = Connectivity::from(signal);
        let changed = self.status.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            info!(status = %next, "connectivity changed");
        }
        changed
    }

    /// A receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.status.subscribe()
    }

    /// Feed signals from `signals` into the monitor on a background task.
    ///
    /// The listener is detached when the returned guard is dropped.
    pub fn attach<S>(&self, signals: S) -> ConnectivityListener
    where
        S: Stream<Item = ConnectivitySignal> + Send + 'static,
    {
        let monitor = self.clone();
        let task = tokio::spawn(async move {
            let mut signals = std::pin::pin!(signals);
            while let Some(signal) = signals.next().await {
                monitor.handle(signal);
            }
        });
        ConnectivityListener { task }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(Connectivity::Online)
    }
}

/// Guard for a listener started by [`ConnectivityMonitor::attach`].
#[derive(Debug)]
pub struct ConnectivityListener {
    task: JoinHandle<()>,
}

impl ConnectivityListener {
    /// True once the signal stream has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ConnectivityListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}
