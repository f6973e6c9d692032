//! Client-side display name filtering.
//!
//! Filtering narrows the page already fetched. It never changes what is
//! requested from the server, so a search never reaches beyond one page.

use userdir_core::UserRecord;

/// Keep records whose display name contains `filter_text`, ignoring case.
///
/// An empty filter returns `records` unchanged, order included.
pub fn apply(records: Vec<UserRecord>, filter_text: &str) -> Vec<UserRecord> {
    if filter_text.is_empty() {
        return records;
    }

    let needle = filter_text.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_needle(record, &needle))
        .collect()
}

/// Returns true if `record` would survive [`apply`] with `filter_text`.
pub fn matches(record: &UserRecord, filter_text: &str) -> bool {
    filter_text.is_empty() || matches_needle(record, &filter_text.to_lowercase())
}

fn matches_needle(record: &UserRecord, needle: &str) -> bool {
    record.display_name.to_lowercase().contains(needle)
}
