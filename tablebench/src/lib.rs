#![warn(missing_docs)]
//! # tablebench
//!
//! Template rendering micro-benchmark.
//!
//! A session generates a deterministic table of records once, renders the
//! `table` sub-template of an HTML template over it a fixed number of times,
//! and reports the minimum, maximum and average render latency in
//! microseconds:
//!
//! ```text
//! Table with 1000 items, 1000 runs:
//! Min: 812 (micros)
//! Max: 2031 (micros)
//! Average: 870 (micros)
//! ```
//!
//! ## Library use
//!
//! ```ignore
//! use tablebench::{SessionPlan, TableTemplate, compute_summary, run_session};
//!
//! let template = TableTemplate::from_path("List.html")?;
//! let result = run_session(&template, &SessionPlan { run_count: 100, ..Default::default() })?;
//! let summary = compute_summary(result.measurements.as_slice())?;
//! println!("avg {} us", summary.average_micros);
//! ```

// Re-export core types
pub use tablebench_core::{
    Customer, ItemShape, Measurements, PlanError, Record, Render, RenderError, SessionError,
    SessionPlan, SessionResult, TableTemplate, TemplateLoadError, Timer, generate_range,
    load_and_run, run_iterations, run_session,
};

// Re-export stats
pub use tablebench_stats::{LatencySummary, StatsError, compute_summary};

// Re-export reporting
pub use tablebench_report::{
    MessageStyle, OutputFormat, Report, build_report, format_human_output, generate_json_report,
};

// Re-export the CLI surface
pub use tablebench_cli::{Cli, Outcome, Settings, TablebenchConfig, execute, run, run_with_cli};
