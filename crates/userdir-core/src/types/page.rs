//! Page request and result types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserRecord;

/// Monotonic request sequence number issued by the fetch sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceId(u64);

impl SequenceId {
    /// Wrap a raw sequence number.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch that has been issued for a page and filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Filter text in effect when the request was issued.
    pub filter_text: String,
    /// Sequence number used to discard stale responses.
    pub sequence_id: SequenceId,
}

/// One page of authoritative records as returned by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Records in server order.
    pub records: Vec<UserRecord>,
    /// The server has at least one more page.
    pub has_more: bool,
}

impl PageResult {
    /// Create a page result.
    pub fn new(records: Vec<UserRecord>, has_more: bool) -> Self {
        Self { records, has_more }
    }
}
