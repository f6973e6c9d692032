//! Fetch command implementation.

use anyhow::{Context, Result};
use clap::Args;

use userdir_core::VisibleListState;
use userdir_sync::{PaginationController, filter};

use crate::cli::DirectoryArgs;
use crate::{output, view};

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Page to fetch, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Only show users whose display name contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Output records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: FetchArgs, directory: &DirectoryArgs) -> Result<()> {
    let client = directory.client()?;
    let filter_text = args.search.unwrap_or_default();

    let page = client
        .fetch_page(args.page)
        .await
        .context("Failed to fetch users")?;
    let has_more = page.has_more;
    let records = filter::apply(page.records, &filter_text);

    let mut pagination = PaginationController::new(args.page);
    pagination.set_has_more(has_more);

    if !args.json && !args.pretty {
        let state = VisibleListState {
            records,
            is_loading: false,
            error_message: None,
            page: pagination.page(),
            has_more,
            can_prev: pagination.can_prev(),
            can_next: pagination.can_next(),
            filter_text,
        };
        let rendered = view::render_list(&state).context("Failed to render users")?;
        print!("{rendered}");
        return Ok(());
    }

    output::json_lines(&records, args.pretty)?;

    if records.is_empty() {
        output::note("No users found.");
    }
    if let Some(next) = pagination.next_page() {
        output::note(&format!("Next page: {next}"));
    }

    Ok(())
}
