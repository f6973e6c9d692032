//! Out-of-order completion tests for the sync driver.
//!
//! A gated source parks every fetch until the test resolves it, so
//! completions can be delivered in any order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use userdir_core::{DirectorySource, FetchError, PageResult, UserRecord, VisibleListState};
use userdir_sync::{EngineHandle, ListSyncEngine, SyncDriver};

type Reply = oneshot::Sender<Result<PageResult, FetchError>>;

/// A fetch parked inside the gated source.
struct Pending {
    page: u32,
    reply: Reply,
}

impl Pending {
    fn resolve(self, result: Result<PageResult, FetchError>) {
        let _ = self.reply.send(result);
    }
}

struct GatedSource {
    requests: mpsc::UnboundedSender<Pending>,
}

#[async_trait]
impl DirectorySource for GatedSource {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Pending { page, reply })
            .map_err(|_| FetchError::network("test harness gone"))?;
        response
            .await
            .unwrap_or_else(|_| Err(FetchError::network("reply dropped")))
    }
}

fn gated(engine: ListSyncEngine) -> (EngineHandle, mpsc::UnboundedReceiver<Pending>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (handle, _task) = SyncDriver::spawn_with(Arc::new(GatedSource { requests: tx }), engine);
    (handle, rx)
}

fn users(page: u32, names: &[&str], has_more: bool) -> Result<PageResult, FetchError> {
    let records = names
        .iter()
        .enumerate()
        .map(|(i, name)| UserRecord::new(u64::from(page) * 100 + i as u64, *name, "", 1000))
        .collect();
    Ok(PageResult::new(records, has_more))
}

/// Let the fetch tasks and the driver run until they park again.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

async fn loaded(handle: &EngineHandle) -> VisibleListState {
    let mut rx = handle.subscribe();
    rx.wait_for(|s| !s.is_loading).await.unwrap().clone()
}

#[tokio::test]
async fn slow_older_page_does_not_overwrite_newer() {
    let (handle, mut requests) = gated(ListSyncEngine::default());

    let mount = requests.recv().await.unwrap();
    assert_eq!(mount.page, 1);
    mount.resolve(users(1, &["Ada"], true));
    loaded(&handle).await;

    handle.next_page();
    let page_two = requests.recv().await.unwrap();
    handle.prev_page();
    let page_one = requests.recv().await.unwrap();
    assert_eq!((page_two.page, page_one.page), (2, 1));

    // the later request (page 1) resolves first, the slow page 2 afterwards
    page_one.resolve(users(1, &["Ada", "Grace"], true));
    let state = loaded(&handle).await;
    assert_eq!(state.page, 1);
    assert_eq!(state.records.len(), 2);

    page_two.resolve(users(2, &["Linus"], true));
    settle().await;

    assert_eq!(handle.snapshot(), state);
}

#[tokio::test]
async fn stale_response_arriving_first_is_discarded() {
    let (handle, mut requests) = gated(ListSyncEngine::default());

    let mount = requests.recv().await.unwrap();
    mount.resolve(users(1, &["Ada"], true));
    loaded(&handle).await;

    handle.next_page();
    let page_two = requests.recv().await.unwrap();
    handle.prev_page();
    let page_one = requests.recv().await.unwrap();

    page_two.resolve(users(2, &["Linus"], true));
    settle().await;
    let state = handle.snapshot();
    assert!(state.is_loading);
    assert_eq!(state.page, 1);
    assert!(state.records.iter().all(|r| r.display_name != "Linus"));

    page_one.resolve(users(1, &["Grace"], true));
    let state = loaded(&handle).await;
    assert_eq!(state.records[0].display_name, "Grace");
}

#[tokio::test]
async fn rapid_filter_changes_resolve_to_last_filter() {
    let (handle, mut requests) = gated(ListSyncEngine::default());

    let mut pending = vec![requests.recv().await.unwrap()];
    for text in ["g", "gr", "gra"] {
        handle.search(text);
        pending.push(requests.recv().await.unwrap());
    }

    // resolve newest first, then every stale one
    let names = ["Ada", "Grace", "Graham", "Greg"];
    while let Some(request) = pending.pop() {
        request.resolve(users(1, &names, false));
        settle().await;
    }

    let state = loaded(&handle).await;
    assert_eq!(state.filter_text, "gra");
    let shown: Vec<&str> = state.records.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(shown, vec!["Grace", "Graham"]);
}

#[tokio::test]
async fn stale_failure_does_not_error_the_view() {
    let (handle, mut requests) = gated(ListSyncEngine::default());

    let mount = requests.recv().await.unwrap();
    handle.search("a");
    let latest = requests.recv().await.unwrap();

    mount.resolve(Err(FetchError::HttpStatus {
        status: 500,
        message: None,
    }));
    settle().await;
    assert!(handle.snapshot().error_message.is_none());

    latest.resolve(users(1, &["Ada"], false));
    let state = loaded(&handle).await;
    assert!(state.error_message.is_none());
    assert_eq!(state.records.len(), 1);
}

#[tokio::test]
async fn admitted_failure_reports_error() {
    let (handle, mut requests) = gated(ListSyncEngine::default());

    let mount = requests.recv().await.unwrap();
    mount.resolve(Err(FetchError::network("connection refused")));

    let state = loaded(&handle).await;
    assert_eq!(
        state.error_message.as_deref(),
        Some("Failed to fetch data: network failure: connection refused")
    );
    assert!(state.records.is_empty());
}
