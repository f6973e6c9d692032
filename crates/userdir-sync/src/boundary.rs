//! Crash isolation around the render step.
//!
//! A boundary is installed with [`CrashIsolationBoundary::new`], trips on the
//! first failing render and stays tripped until [`reset`] is called by its
//! owner. While tripped it renders the fallback without calling the renderer.
//!
//! [`reset`]: CrashIsolationBoundary::reset

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;
use userdir_core::{ErrorContext, ErrorReporter, RenderError, VisibleListState};

/// Boundary lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    /// Renders pass through.
    Armed,
    /// A render failed; the fallback is shown until reset.
    Tripped(RenderError),
}

/// Output of a render through the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// The renderer's own output.
    View(T),
    /// The fallback view plus the error that tripped the boundary.
    Fallback { fallback: String, error: RenderError },
}

impl<T> Rendered<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Reports render failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &RenderError, context: &ErrorContext) {
        error!(
            boundary = %context.boundary,
            component = %context.component,
            records = context.record_count,
            occurred_at = %context.occurred_at,
            error = %error,
            "render failed"
        );
    }
}

/// Supervises a renderer so that its failures replace only its own output.
#[derive(Debug)]
pub struct CrashIsolationBoundary<R = TracingReporter> {
    name: String,
    fallback: String,
    reporter: R,
    state: BoundaryState,
}

impl CrashIsolationBoundary<TracingReporter> {
    /// Install a boundary that reports through `tracing`.
    pub fn with_tracing(name: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self::new(name, fallback, TracingReporter)
    }
}

impl<R: ErrorReporter> CrashIsolationBoundary<R> {
    /// Install an armed boundary.
    pub fn new(name: impl Into<String>, fallback: impl Into<String>, reporter: R) -> Self {
        Self {
            name: name.into(),
            fallback: fallback.into(),
            reporter,
            state: BoundaryState::Armed,
        }
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_tripped(&self) -> bool {
        matches!(self.state, BoundaryState::Tripped(_))
    }

    /// Re-arm a tripped boundary, as a parent remount would.
    pub fn reset(&mut self) {
        self.state = BoundaryState::Armed;
    }

    /// Render `snapshot` with `render`, containing errors and panics.
    pub fn render<T, F>(&mut self, component: &str, snapshot: &VisibleListState, render: F) -> Rendered<T>
    where
        F: FnOnce(&VisibleListState) -> Result<T, RenderError>,
    {
        if let BoundaryState::Tripped(error) = &self.state {
            return self.fallback(error.clone());
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| render(snapshot)));
        let error = match outcome {
            Ok(Ok(view)) => return Rendered::View(view),
            Ok(Err(error)) => error,
            Err(payload) => RenderError::Panicked {
                message: panic_message(payload.as_ref()),
            },
        };

        let context = ErrorContext::now(&self.name, component, snapshot.records.len());
        self.reporter.report(&error, &context);
        self.state = BoundaryState::Tripped(error.clone());
        self.fallback(error)
    }

    fn fallback<T>(&self, error: RenderError) -> Rendered<T> {
        Rendered::Fallback {
            fallback: self.fallback.clone(),
            error,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use userdir_core::UserRecord;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(RenderError, ErrorContext)>>>);

    impl ErrorReporter for Recorder {
        fn report(&self, error: &RenderError, context: &ErrorContext) {
            self.0.lock().unwrap().push((error.clone(), context.clone()));
        }
    }

    fn snapshot() -> VisibleListState {
        let mut state = VisibleListState::default();
        state.records.push(UserRecord::new(1, "Ada", "", 100));
        state
    }

    fn boundary(recorder: &Recorder) -> CrashIsolationBoundary<Recorder> {
        CrashIsolationBoundary::new("list", "An error occurred. Please try again.", recorder.clone())
    }

    #[test]
    fn passes_through_success() {
        let recorder = Recorder::default();
        let mut boundary = boundary(&recorder);

        let out = boundary.render("rows", &snapshot(), |s| Ok(s.records.len()));

        assert_eq!(out, Rendered::View(1));
        assert!(!boundary.is_tripped());
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn reported_error_trips_and_reports() {
        let recorder = Recorder::default();
        let mut boundary = boundary(&recorder);

        let out: Rendered<()> =
            boundary.render("rows", &snapshot(), |_| Err(RenderError::failed("bad row")));

        assert_eq!(
            out,
            Rendered::Fallback {
                fallback: "An error occurred. Please try again.".to_string(),
                error: RenderError::failed("bad row"),
            }
        );
        assert!(boundary.is_tripped());

        let reports = recorder.0.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].1.boundary, "list");
        assert_eq!(reports[0].1.component, "rows");
        assert_eq!(reports[0].1.record_count, 1);
    }

    #[test]
    fn panic_is_contained() {
        let recorder = Recorder::default();
        let mut boundary = boundary(&recorder);

        let out: Rendered<()> = boundary.render("rows", &snapshot(), |_| panic!("row exploded"));

        match out {
            Rendered::Fallback { error, .. } => {
                assert_eq!(
                    error,
                    RenderError::Panicked {
                        message: "row exploded".to_string()
                    }
                );
            }
            Rendered::View(()) => panic!("expected fallback"),
        }
    }

    #[test]
    fn formatted_panic_message() {
        let recorder = Recorder::default();
        let mut boundary = boundary(&recorder);
        let id = 7;

        let out: Rendered<()> = boundary.render("rows", &snapshot(), |_| panic!("row {id} exploded"));

        assert!(matches!(
            out,
            Rendered::Fallback { error: RenderError::Panicked { message }, .. } if message == "row 7 exploded"
        ));
    }

    #[test]
    fn stays_tripped_until_reset() {
        let recorder = Recorder::default();
        let mut boundary = boundary(&recorder);

        let _: Rendered<()> = boundary.render("rows", &snapshot(), |_| Err(RenderError::failed("x")));

        let mut called = false;
        let out = boundary.render("rows", &snapshot(), |_| {
            called = true;
            Ok(())
        });
        assert!(!called);
        assert!(out.is_fallback());
        assert_eq!(recorder.0.lock().unwrap().len(), 1);

        boundary.reset();
        let out = boundary.render("rows", &snapshot(), |_| Ok(()));
        assert_eq!(out, Rendered::View(()));
        assert_eq!(boundary.state(), &BoundaryState::Armed);
    }
}
