//! Benchmark Session Runner
//!
//! A session loads a template, generates the record sequence once, then
//! renders the sub-template `run_count` times and records the elapsed
//! microseconds of every render.
//!
//! ```text
//! SessionPlan ──▶ TableTemplate::from_path ──▶ generate_range
//!                                                   │
//!                                   warmup (untimed)│
//!                                                   ▼
//!                               run_count × { sink, start, render, stop }
//!                                                   │
//!                                                   ▼
//!                                             SessionResult
//! ```
//!
//! Render errors never abort the loop. A failed render is timed exactly like
//! a successful one and only counted in [`SessionResult::render_failures`].

use crate::data::{ItemShape, Record, generate_range};
use crate::measure::Timer;
use crate::template::{Render, RenderError, TableTemplate, TemplateLoadError};
use std::path::Path;
use thiserror::Error;

/// Number of timed renders per session
pub const DEFAULT_RUN_COUNT: usize = 1000;

/// Number of generated records
pub const DEFAULT_ITEM_COUNT: usize = 1000;

/// Sub-template rendered by every iteration
pub const DEFAULT_SUB_TEMPLATE: &str = "table";

/// Invalid session parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A session needs at least one timed run
    #[error("run count must be at least 1")]
    ZeroRuns,
    /// Sub-template name is empty
    #[error("sub-template name must not be empty")]
    EmptySubTemplate,
}

/// Session could not produce measurements
#[derive(Debug, Error)]
pub enum SessionError {
    /// Template acquisition failed; no measurements were taken
    #[error(transparent)]
    Load(#[from] TemplateLoadError),
    /// Session parameters were rejected
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Parameters of one benchmark session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    /// Records generated (once) for the session
    pub item_count: usize,
    /// Timed render iterations
    pub run_count: usize,
    /// Untimed renders performed before the timed loop
    pub warmup_runs: usize,
    /// Record shape
    pub shape: ItemShape,
    /// Name of the sub-template to render
    pub sub_template: String,
}

impl Default for SessionPlan {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            run_count: DEFAULT_RUN_COUNT,
            warmup_runs: 0,
            shape: ItemShape::default(),
            sub_template: DEFAULT_SUB_TEMPLATE.to_string(),
        }
    }
}

impl SessionPlan {
    /// Reject plans the timed loop cannot honor
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.run_count == 0 {
            return Err(PlanError::ZeroRuns);
        }
        if self.sub_template.is_empty() {
            return Err(PlanError::EmptySubTemplate);
        }
        Ok(())
    }
}

/// Per-iteration elapsed microseconds, in iteration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurements {
    micros: Vec<u64>,
}

impl Measurements {
    /// Samples as a slice
    pub fn as_slice(&self) -> &[u64] {
        &self.micros
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.micros.len()
    }

    /// Whether no sample was recorded
    pub fn is_empty(&self) -> bool {
        self.micros.is_empty()
    }
}

/// Outcome of the timed loop
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// One sample per iteration
    pub measurements: Measurements,
    /// Iterations whose render returned an error
    pub render_failures: usize,
    /// Message of the first failed render, if any
    pub first_failure: Option<String>,
}

/// Everything a completed session produced
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Plan the session ran with
    pub plan: SessionPlan,
    /// One sample per timed iteration
    pub measurements: Measurements,
    /// Timed iterations whose render returned an error
    pub render_failures: usize,
    /// Message of the first failed render, if any
    pub first_failure: Option<String>,
}

/// Render `sub_template` over `items` exactly `run_count` times, sequentially.
///
/// Each iteration gets a fresh sink that is dropped unread. The render result
/// is inspected only after the timer stopped and never ends the loop.
pub fn run_iterations<R: Render + ?Sized>(
    renderer: &R,
    sub_template: &str,
    items: &[Record],
    run_count: usize,
) -> LoopOutcome {
    let mut micros = vec![0u64; run_count];
    let mut render_failures = 0;
    let mut first_failure = None;

    for slot in micros.iter_mut() {
        let mut sink: Vec<u8> = Vec::new();

        let timer = Timer::start();
        let result = renderer.render_to(sub_template, items, &mut sink);
        *slot = timer.stop_micros();

        if let Err(e) = result {
            render_failures += 1;
            first_failure.get_or_insert_with(|| e.to_string());
        }
    }

    LoopOutcome {
        measurements: Measurements { micros },
        render_failures,
        first_failure,
    }
}

/// Untimed renders; results are dropped
pub fn run_warmup<R: Render + ?Sized>(
    renderer: &R,
    sub_template: &str,
    items: &[Record],
    warmup_runs: usize,
) {
    for _ in 0..warmup_runs {
        let mut sink: Vec<u8> = Vec::new();
        let _: Result<(), RenderError> = renderer.render_to(sub_template, items, &mut sink);
    }
}

/// Run a session against an already acquired renderer
pub fn run_session<R: Render + ?Sized>(
    renderer: &R,
    plan: &SessionPlan,
) -> Result<SessionResult, PlanError> {
    plan.validate()?;

    let items = generate_range(plan.item_count, plan.shape);
    tracing::debug!(items = items.len(), shape = %plan.shape, "records generated");

    if plan.warmup_runs > 0 {
        tracing::debug!(runs = plan.warmup_runs, "warmup");
        run_warmup(renderer, &plan.sub_template, &items, plan.warmup_runs);
    }

    tracing::info!(
        items = plan.item_count,
        runs = plan.run_count,
        sub_template = %plan.sub_template,
        "measuring"
    );
    let outcome = run_iterations(renderer, &plan.sub_template, &items, plan.run_count);

    if let Some(first) = &outcome.first_failure {
        tracing::warn!(
            failures = outcome.render_failures,
            runs = plan.run_count,
            first = %first,
            "renders failed during measurement; their timings are kept"
        );
    }

    Ok(SessionResult {
        plan: plan.clone(),
        measurements: outcome.measurements,
        render_failures: outcome.render_failures,
        first_failure: outcome.first_failure,
    })
}

/// Load the template at `path`, then run a session with it.
///
/// A load failure returns before any record is generated or measured.
pub fn load_and_run(
    path: impl AsRef<Path>,
    plan: &SessionPlan,
) -> Result<SessionResult, SessionError> {
    plan.validate()?;
    let template = TableTemplate::from_path(path.as_ref())?;
    tracing::debug!(template = %template.name(), "template loaded");
    if !template.has_sub_template(&plan.sub_template) {
        tracing::warn!(
            sub_template = %plan.sub_template,
            "template does not define the sub-template; every render will fail"
        );
    }
    Ok(run_session(&template, plan)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;

    /// Counts calls and checks every call sees the full sequence
    struct Counting {
        calls: Cell<usize>,
        expected_len: usize,
    }

    impl Render for Counting {
        fn render_to(
            &self,
            sub_template: &str,
            items: &[Record],
            sink: &mut dyn Write,
        ) -> Result<(), RenderError> {
            assert_eq!(sub_template, "table");
            assert_eq!(items.len(), self.expected_len);
            assert!(items.iter().enumerate().all(|(i, r)| r.id == i as u64));
            self.calls.set(self.calls.get() + 1);
            sink.write_all(b"<tr></tr>")?;
            Ok(())
        }
    }

    struct Failing;

    impl Render for Failing {
        fn render_to(&self, name: &str, _: &[Record], _: &mut dyn Write) -> Result<(), RenderError> {
            Err(RenderError::MissingSubTemplate(name.to_string()))
        }
    }

    fn plan(items: usize, runs: usize) -> SessionPlan {
        SessionPlan {
            item_count: items,
            run_count: runs,
            ..SessionPlan::default()
        }
    }

    #[test]
    fn test_default_plan() {
        let plan = SessionPlan::default();
        assert_eq!(plan.item_count, 1000);
        assert_eq!(plan.run_count, 1000);
        assert_eq!(plan.warmup_runs, 0);
        assert_eq!(plan.sub_template, "table");
        assert_eq!(plan.shape, ItemShape::WithCustomer);
    }

    #[test]
    fn test_measurement_length_equals_run_count() {
        for runs in [1usize, 2, 17] {
            let renderer = Counting {
                calls: Cell::new(0),
                expected_len: 5,
            };
            let result = run_session(&renderer, &plan(5, runs)).unwrap();
            assert_eq!(result.measurements.len(), runs);
            assert_eq!(renderer.calls.get(), runs);
            assert_eq!(result.render_failures, 0);
            assert!(result.first_failure.is_none());
        }
    }

    #[test]
    fn test_warmup_not_recorded() {
        let renderer = Counting {
            calls: Cell::new(0),
            expected_len: 3,
        };
        let mut plan = plan(3, 4);
        plan.warmup_runs = 2;

        let result = run_session(&renderer, &plan).unwrap();
        assert_eq!(result.measurements.len(), 4);
        assert_eq!(renderer.calls.get(), 6);
    }

    #[test]
    fn test_render_failures_do_not_abort() {
        let result = run_session(&Failing, &plan(10, 25)).unwrap();
        assert_eq!(result.measurements.len(), 25);
        assert_eq!(result.render_failures, 25);
        assert_eq!(
            result.first_failure.as_deref(),
            Some("no sub-template named \"table\"")
        );
    }

    #[test]
    fn test_zero_runs_rejected() {
        let err = run_session(&Failing, &plan(10, 0)).unwrap_err();
        assert_eq!(err, PlanError::ZeroRuns);

        let mut plan = plan(1, 1);
        plan.sub_template.clear();
        assert_eq!(plan.validate(), Err(PlanError::EmptySubTemplate));
    }

    #[test]
    fn test_load_failure_takes_no_measurements() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_and_run(dir.path().join("nope.html"), &plan(10, 10)).unwrap_err();
        assert!(matches!(err, SessionError::Load(TemplateLoadError::Read { .. })));
    }

    #[test]
    fn test_load_and_run_with_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("List.html");
        std::fs::write(&path, "{% macro table(items) %}{% endmacro %}").unwrap();

        let result = load_and_run(&path, &plan(20, 8)).unwrap();
        assert_eq!(result.measurements.len(), 8);
        assert_eq!(result.render_failures, 0);
    }
}
