//! Connectivity probe feeding the connectivity monitor.
//!
//! There is no OS-level online/offline event to listen to, so reachability of
//! the endpoint host stands in for it.

use std::time::Duration;

use futures_util::Stream;
use tokio::net::TcpStream;
use tokio::time::{MissedTickBehavior, timeout};
use tracing::debug;

use userdir_core::ConnectivitySignal;
use userdir_http::DirectoryUrl;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Emit a signal every `every` based on whether the endpoint host accepts
/// TCP connections. The first probe runs immediately. The stream owns its
/// target and does not borrow `endpoint`.
pub fn signals(
    endpoint: &DirectoryUrl,
    every: Duration,
) -> impl Stream<Item = ConnectivitySignal> + use<> {
    let host = endpoint.host().to_string();
    let port = endpoint.port();

    async_stream::stream! {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            yield probe(&host, port).await;
        }
    }
}

async fn probe(host: &str, port: u16) -> ConnectivitySignal {
    match timeout(PROBE_TIMEOUT, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => ConnectivitySignal::Online,
        Ok(Err(e)) => {
            debug!(host, port, error = %e, "connectivity probe failed");
            ConnectivitySignal::Offline
        }
        Err(_) => {
            debug!(host, port, "connectivity probe timed out");
            ConnectivitySignal::Offline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use userdir_core::Connectivity;
    use userdir_sync::ConnectivityMonitor;

    #[tokio::test]
    async fn reachable_host_is_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let endpoint = DirectoryUrl::new(format!("http://127.0.0.1:{port}/users")).unwrap();

        let stream = signals(&endpoint, Duration::from_secs(60));
        let mut stream = std::pin::pin!(stream);
        assert_eq!(stream.next().await, Some(ConnectivitySignal::Online));
    }

    #[tokio::test]
    async fn closed_port_reports_offline_to_monitor() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        // The stream must outlive the endpoint it was built from.
        let stream = {
            let endpoint = DirectoryUrl::new(format!("http://127.0.0.1:{port}/users")).unwrap();
            signals(&endpoint, Duration::from_secs(60))
        };

        let monitor = ConnectivityMonitor::default();
        let mut status = monitor.subscribe();
        let _listener = monitor.attach(stream);

        status.changed().await.unwrap();
        assert_eq!(*status.borrow(), Connectivity::Offline);
    }
}
