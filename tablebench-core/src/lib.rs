#![warn(missing_docs)]
//! tablebench Core - Data and Render Loop
//!
//! This crate provides everything a benchmark session touches:
//! - Deterministic record generation (`generate_range`)
//! - Microsecond wall-clock timer
//! - minijinja-backed template adapter behind the `Render` trait
//! - The sequential timed render loop and session orchestration

mod data;
mod measure;
mod runner;
mod template;

pub use data::{COUNT_CYCLE, Customer, ITEM_PRICE, ItemShape, Record, generate_range};
pub use measure::{Timer, duration_micros};
pub use runner::{
    DEFAULT_ITEM_COUNT, DEFAULT_RUN_COUNT, DEFAULT_SUB_TEMPLATE, LoopOutcome, Measurements,
    PlanError, SessionError, SessionPlan, SessionResult, load_and_run, run_iterations,
    run_session, run_warmup,
};
pub use template::{Render, RenderError, TableTemplate, TemplateLoadError};
