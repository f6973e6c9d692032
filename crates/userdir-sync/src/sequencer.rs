//! Last-request-wins sequencing of page fetches.

use tracing::trace;
use userdir_core::{PageRequest, SequenceId};

/// Allocates request sequence numbers and admits only the latest response.
///
/// Issuing a request makes every earlier request non-authoritative at once,
/// whether or not it has resolved. A response is admitted only if its id is
/// the outstanding one, and at most once.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    last_issued: u64,
    outstanding: Option<SequenceId>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next sequence number for `page` and `filter_text`.
    pub fn issue(&mut self, page: u32, filter_text: &str) -> PageRequest {
        self.last_issued += 1;
        let sequence_id = SequenceId::new(self.last_issued);
        if let Some(superseded) = self.outstanding.replace(sequence_id) {
            trace!(%superseded, by = %sequence_id, "request superseded");
        }

        PageRequest {
            page,
            filter_text: filter_text.to_string(),
            sequence_id,
        }
    }

    /// Returns true if `sequence_id` is the outstanding request.
    ///
    /// A successful admit resolves the outstanding request, so the same id is
    /// never admitted twice.
    pub fn admit(&mut self, sequence_id: SequenceId) -> bool {
        if self.outstanding == Some(sequence_id) {
            self.outstanding = None;
            true
        } else {
            trace!(%sequence_id, outstanding = ?self.outstanding, "response discarded");
            false
        }
    }

    /// The request currently allowed to update visible state, if unresolved.
    pub fn outstanding(&self) -> Option<SequenceId> {
        self.outstanding
    }

    /// The most recently issued id.
    pub fn last_issued(&self) -> Option<SequenceId> {
        (self.last_issued > 0).then(|| SequenceId::new(self.last_issued))
    }
}
