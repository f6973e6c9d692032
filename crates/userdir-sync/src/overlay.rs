//! Session-local follow/block annotations.
//!
//! Annotations are never sent to the server. They live as long as their record
//! stays visible: re-applied to records that come back in the next admitted
//! page and forgotten for records that don't.

use std::collections::HashMap;

use tracing::debug;
use userdir_core::UserRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Annotation {
    following: bool,
    blocked: bool,
}

/// Follow/block overlay over the visible records.
#[derive(Debug, Default)]
pub struct MutationOverlay {
    annotations: HashMap<u64, Annotation>,
}

impl MutationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `is_following` on the record with `id`, unless it is blocked.
    ///
    /// Returns true if the record changed. Blocked or absent records are left
    /// alone without error.
    pub fn toggle_follow(&mut self, records: &mut [UserRecord], id: u64) -> bool {
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if record.is_blocked {
            debug!(id, "follow toggle ignored for blocked record");
            return false;
        }

        record.is_following = !record.is_following;
        self.remember(record);
        true
    }

    /// Set `is_blocked` on the record with `id`.
    ///
    /// Returns true if the record changed. Blocking is irreversible for the
    /// session; absent records are left alone.
    pub fn block(&mut self, records: &mut [UserRecord], id: u64) -> bool {
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if record.is_blocked {
            return false;
        }

        record.is_blocked = true;
        self.remember(record);
        true
    }

    /// Re-apply annotations to a freshly admitted record set.
    ///
    /// Annotations of records missing from `records` are dropped.
    pub fn reapply(&mut self, records: &mut [UserRecord]) {
        let mut kept = HashMap::with_capacity(self.annotations.len());
        for record in records.iter_mut() {
            if let Some(annotation) = self.annotations.remove(&record.id) {
                record.is_following = annotation.following;
                record.is_blocked = annotation.blocked;
                kept.insert(record.id, annotation);
            }
        }

        if !self.annotations.is_empty() {
            debug!(dropped = self.annotations.len(), "annotations dropped with their records");
        }
        self.annotations = kept;
    }

    /// Number of records currently carrying annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn remember(&mut self, record: &UserRecord) {
        self.annotations.insert(
            record.id,
            Annotation {
                following: record.is_following,
                blocked: record.is_blocked,
            },
        );
    }
}
