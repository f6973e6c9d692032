//! The list synchronization state machine.
//!
//! The engine never performs I/O. Inbound events return the [`PageRequest`]
//! that must be fetched, if any; the caller runs the fetch and hands the
//! outcome back to [`ListSyncEngine::complete`]. Only the outcome of the most
//! recently issued request is admitted.

use tracing::{debug, warn};
use userdir_core::{FetchError, PageRequest, PageResult, SequenceId, VisibleListState};

use crate::filter;
use crate::overlay::MutationOverlay;
use crate::pagination::PaginationController;
use crate::sequencer::FetchSequencer;

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// An authoritative fetch is in flight.
    Loading,
    /// The latest request succeeded.
    Loaded,
    /// The latest request failed.
    Errored,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The result updated visible state.
    Admitted,
    /// A later request had been issued; the result was discarded.
    Superseded,
}

/// Owns the visible list and reconciles fetch completions with it.
#[derive(Debug)]
pub struct ListSyncEngine {
    state: VisibleListState,
    phase: Phase,
    sequencer: FetchSequencer,
    pagination: PaginationController,
    overlay: MutationOverlay,
}

impl ListSyncEngine {
    /// Create an idle engine positioned at `page` with `filter_text`.
    pub fn new(page: u32, filter_text: impl Into<String>) -> Self {
        let pagination = PaginationController::new(page);
        let mut engine = Self {
            state: VisibleListState::new(pagination.page(), filter_text),
            phase: Phase::Idle,
            sequencer: FetchSequencer::new(),
            pagination,
            overlay: MutationOverlay::new(),
        };
        engine.sync_controls();
        engine
    }

    /// The current snapshot.
    pub fn state(&self) -> &VisibleListState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Issue the initial fetch. Only valid while idle.
    pub fn start(&mut self) -> Option<PageRequest> {
        (self.phase == Phase::Idle).then(|| self.begin_fetch())
    }

    /// The filter text changed. Refetches the current page if it differs.
    pub fn on_search_text_change(&mut self, text: impl Into<String>) -> Option<PageRequest> {
        let text = text.into();
        if text == self.state.filter_text {
            return None;
        }
        self.state.filter_text = text;
        Some(self.begin_fetch())
    }

    /// Advance one page. Ignored unless the last admitted page had more.
    pub fn on_next_page(&mut self) -> Option<PageRequest> {
        self.pagination.next_page()?;
        self.sync_controls();
        Some(self.begin_fetch())
    }

    /// Go back one page. Ignored on page 1.
    pub fn on_prev_page(&mut self) -> Option<PageRequest> {
        let before = self.pagination.page();
        if self.pagination.prev_page() == before {
            return None;
        }
        self.sync_controls();
        Some(self.begin_fetch())
    }

    /// Toggle follow on a visible record. Returns true if it changed.
    pub fn on_follow_toggle(&mut self, id: u64) -> bool {
        self.overlay.toggle_follow(&mut self.state.records, id)
    }

    /// Block a visible record. Returns true if it changed.
    pub fn on_block(&mut self, id: u64) -> bool {
        self.overlay.block(&mut self.state.records, id)
    }

    /// Apply the outcome of the fetch issued as `sequence_id`.
    pub fn complete(
        &mut self,
        sequence_id: SequenceId,
        result: Result<PageResult, FetchError>,
    ) -> Admission {
        if !self.sequencer.admit(sequence_id) {
            return Admission::Superseded;
        }

        match result {
            Ok(page) => {
                let mut records = filter::apply(page.records, &self.state.filter_text);
                self.overlay.reapply(&mut records);
                self.pagination.set_has_more(page.has_more);

                self.state = VisibleListState {
                    records,
                    is_loading: false,
                    error_message: None,
                    page: self.pagination.page(),
                    has_more: page.has_more,
                    can_prev: self.pagination.can_prev(),
                    can_next: self.pagination.can_next(),
                    filter_text: std::mem::take(&mut self.state.filter_text),
                };
                self.phase = Phase::Loaded;
                debug!(
                    %sequence_id,
                    page = self.state.page,
                    records = self.state.records.len(),
                    "page admitted"
                );
            }
            Err(err) => {
                warn!(%sequence_id, page = self.state.page, error = %err, "page fetch failed");
                self.state.is_loading = false;
                self.state.error_message = Some(format!("Failed to fetch data: {err}"));
                self.phase = Phase::Errored;
            }
        }

        Admission::Admitted
    }

    /// Mirror the pagination controller onto the snapshot.
    fn sync_controls(&mut self) {
        self.state.page = self.pagination.page();
        self.state.can_prev = self.pagination.can_prev();
        self.state.can_next = self.pagination.can_next();
    }

    fn begin_fetch(&mut self) -> PageRequest {
        let request = self
            .sequencer
            .issue(self.pagination.page(), &self.state.filter_text);
        self.state.is_loading = true;
        self.phase = Phase::Loading;
        debug!(
            sequence_id = %request.sequence_id,
            page = request.page,
            filter = %request.filter_text,
            "fetch issued"
        );
        request
    }
}

impl Default for ListSyncEngine {
    fn default() -> Self {
        Self::new(1, "")
    }
}
