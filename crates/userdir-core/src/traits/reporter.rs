//! Error reporter trait.

use crate::error::RenderError;
use crate::types::ErrorContext;

/// External logging collaborator for render failures.
pub trait ErrorReporter: Send + Sync {
    /// Record a caught render failure.
    fn report(&self, error: &RenderError, context: &ErrorContext);
}
