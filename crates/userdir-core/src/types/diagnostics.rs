//! Diagnostic context forwarded with render failures.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Auxiliary context reported alongside a render failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorContext {
    /// Name of the boundary that caught the failure.
    pub boundary: String,
    /// Component that was being rendered.
    pub component: String,
    /// Number of records in the snapshot being rendered.
    pub record_count: usize,
    /// When the failure was caught.
    pub occurred_at: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a context stamped with the current time.
    pub fn now(
        boundary: impl Into<String>,
        component: impl Into<String>,
        record_count: usize,
    ) -> Self {
        Self {
            boundary: boundary.into(),
            component: component.into(),
            record_count,
            occurred_at: Utc::now(),
        }
    }
}
