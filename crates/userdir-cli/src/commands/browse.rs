//! Interactive browse command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use userdir_core::{Connectivity, VisibleListState};
use userdir_http::RemoteDirectoryClient;
use userdir_sync::{
    ConnectivityMonitor, CrashIsolationBoundary, EngineHandle, ListSyncEngine, Rendered, SyncDriver,
};

use crate::cli::DirectoryArgs;
use crate::input::{self, Input};
use crate::{output, probe, view};

const BOUNDARY: &str = "user-list";
const FALLBACK: &str = "An error occurred. Please try again.";

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Page to start on, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Initial search text
    #[arg(long)]
    pub search: Option<String>,

    /// Seconds between connectivity probes (0 disables probing)
    #[arg(long, default_value_t = 15)]
    pub probe_interval_secs: u64,
}

pub async fn run(args: BrowseArgs, directory: &DirectoryArgs) -> Result<()> {
    let config = directory.config()?;
    let endpoint = config.endpoint.clone();
    let client = RemoteDirectoryClient::new(config).context("Failed to build HTTP client")?;

    let engine = ListSyncEngine::new(args.page, args.search.unwrap_or_default());
    let (handle, driver) = SyncDriver::spawn_with(Arc::new(client), engine);
    info!(endpoint = %endpoint, page = args.page, "browsing directory");

    let monitor = ConnectivityMonitor::default();
    let _listener = (args.probe_interval_secs > 0).then(|| {
        let every = Duration::from_secs(args.probe_interval_secs);
        monitor.attach(probe::signals(&endpoint, every))
    });

    let mut screen = Screen {
        boundary: CrashIsolationBoundary::with_tracing(BOUNDARY, FALLBACK),
        state: handle.snapshot(),
        connectivity: monitor.current(),
    };
    let mut snapshots = handle.subscribe();
    let mut connectivity = monitor.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    screen.draw();
    println!("Type h for help.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("stdin closed");
                    break;
                };
                match input::parse(&line) {
                    Ok(Input::Quit) => break,
                    Ok(input) => screen.handle(&handle, input),
                    Err(e) => output::error(&e.to_string()),
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                screen.state = snapshots.borrow_and_update().clone();
                screen.draw();
            }
            Ok(()) = connectivity.changed() => {
                screen.connectivity = *connectivity.borrow_and_update();
                screen.draw();
            }
        }
    }

    drop(handle);
    driver.await.context("Sync driver failed")?;
    Ok(())
}

struct Screen {
    boundary: CrashIsolationBoundary,
    state: VisibleListState,
    connectivity: Connectivity,
}

impl Screen {
    fn handle(&mut self, handle: &EngineHandle, input: Input) {
        match input {
            Input::Next if !self.state.can_next => output::error("Already on the last page"),
            Input::Prev if !self.state.can_prev => output::error("Already on the first page"),
            Input::Next => {
                handle.next_page();
            }
            Input::Prev => {
                handle.prev_page();
            }
            Input::Search(text) => {
                handle.search(text);
            }
            Input::Follow(id) | Input::Block(id) if self.state.record(id).is_none() => {
                output::error(&format!("User {id} is not on this page"));
            }
            Input::Follow(id) => {
                handle.request_follow_toggle(id);
            }
            Input::Block(id) => {
                handle.request_block(id);
            }
            Input::Remount => {
                self.boundary.reset();
                self.draw();
            }
            Input::Help => println!("{}", input::HELP),
            Input::Quit | Input::Empty => {}
        }
    }

    fn draw(&mut self) {
        println!();
        println!("{}", view::connectivity(self.connectivity));
        match self.boundary.render(BOUNDARY, &self.state, view::render_list) {
            Rendered::View(list) => print!("{list}"),
            Rendered::Fallback { fallback, error } => {
                output::error(&fallback);
                output::field("Details", error.message());
                output::field("Recover", "press r to redraw");
            }
        }
    }
}
