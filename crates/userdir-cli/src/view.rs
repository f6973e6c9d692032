//! Terminal rendering of list snapshots.
//!
//! Rendering is a pure function of the snapshot. A record that cannot be shown
//! safely fails the render; the caller decides how to contain that.

use std::fmt::Write;

use colored::Colorize;
use userdir_core::{Connectivity, RenderError, UserRecord, VisibleListState};

const NAME_WIDTH: usize = 36;

/// Render the whole list view: search line, header, rows and footer.
pub fn render_list(state: &VisibleListState) -> Result<String, RenderError> {
    let mut out = String::new();

    if !state.filter_text.is_empty() {
        writeln!(out, "{} \"{}\"", "Search:".dimmed(), state.filter_text)?;
    }

    writeln!(
        out,
        "{}",
        format!("{:>10}  {:<NAME_WIDTH$} {:>10}", "Id", "User", "Reputation").bold()
    )?;

    for record in &state.records {
        render_row(&mut out, record)?;
    }

    if state.records.is_empty() && !state.is_loading {
        writeln!(out, "{}", "No users on this page.".dimmed())?;
    }

    writeln!(out, "{}", footer(state))?;
    Ok(out)
}

fn render_row(out: &mut String, record: &UserRecord) -> Result<(), RenderError> {
    if record.display_name.chars().any(char::is_control) {
        return Err(RenderError::failed(format!(
            "user {} has a display name with control characters",
            record.id
        )));
    }

    let mut label = record.display_name.clone();
    if record.is_following {
        label.push_str(" ⭐");
    }
    if record.is_blocked {
        label.push_str(" (Blocked)");
    }

    let line = format!(
        "{:>10}  {:<NAME_WIDTH$} {:>10}",
        record.id, label, record.reputation
    );
    if record.is_blocked {
        writeln!(out, "{}", line.dimmed())?;
    } else if record.is_following {
        writeln!(out, "{}", line.green())?;
    } else {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Loading indicator, error, or page controls.
pub fn footer(state: &VisibleListState) -> String {
    if state.is_loading {
        return "Loading...".dimmed().to_string();
    }
    if let Some(message) = &state.error_message {
        return format!("{} {}", "Error:".red(), message);
    }

    let prev = if state.can_prev {
        "[p] Prev".normal()
    } else {
        "[p] Prev".dimmed()
    };
    let next = if state.can_next {
        "[n] Next".normal()
    } else {
        "[n] Next".dimmed()
    };
    format!("{prev}   Page {}   {next}", state.page)
}

/// Status line for the connectivity indicator.
pub fn connectivity(status: Connectivity) -> String {
    match status {
        Connectivity::Online => status.status_line().green().to_string(),
        Connectivity::Offline => status.status_line().yellow().to_string(),
    }
}
