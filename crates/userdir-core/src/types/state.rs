//! Visible list snapshot.

use serde::{Deserialize, Serialize};

use super::UserRecord;

/// The snapshot the presentation layer renders.
///
/// Replaced wholesale on every admitted fetch; only follow/block annotations
/// are applied in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleListState {
    /// Records after filtering and overlay.
    pub records: Vec<UserRecord>,
    /// An authoritative fetch is in flight.
    pub is_loading: bool,
    /// Message of the last admitted fetch failure.
    pub error_message: Option<String>,
    /// Current page, starting at 1.
    pub page: u32,
    /// The last admitted page reported more pages.
    pub has_more: bool,
    /// The previous-page control is enabled.
    pub can_prev: bool,
    /// The next-page control is enabled.
    pub can_next: bool,
    /// Current filter text.
    pub filter_text: String,
}

impl VisibleListState {
    /// Empty state for the given page and filter.
    pub fn new(page: u32, filter_text: impl Into<String>) -> Self {
        let page = page.max(1);
        Self {
            records: Vec::new(),
            is_loading: false,
            error_message: None,
            page,
            has_more: false,
            can_prev: page > 1,
            can_next: false,
            filter_text: filter_text.into(),
        }
    }

    /// Find a visible record by id.
    pub fn record(&self, id: u64) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

impl Default for VisibleListState {
    fn default() -> Self {
        Self::new(1, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(VisibleListState::new(0, "").page, 1);
        assert!(!VisibleListState::new(0, "").can_prev);
        assert!(VisibleListState::new(3, "").can_prev);
    }

    #[test]
    fn record_lookup() {
        let mut state = VisibleListState::default();
        state.records.push(UserRecord::new(4, "Linus", "", 9));
        assert_eq!(state.record(4).map(|r| r.display_name.as_str()), Some("Linus"));
        assert!(state.record(5).is_none());
    }
}
