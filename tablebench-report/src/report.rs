//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tablebench_core::{ItemShape, SessionResult};
use tablebench_stats::LatencySummary;

/// Current JSON schema version
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Complete session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Tool and run metadata
    pub meta: ReportMeta,
    /// Session parameters
    pub session: SessionInfo,
    /// Reduced measurements
    pub summary: LatencySummary,
    /// Timed renders that returned an error (their timings are included)
    pub render_failures: usize,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// JSON schema version
    pub schema_version: u32,
    /// tablebench version
    pub version: String,
    /// Report creation time
    pub timestamp: DateTime<Utc>,
}

/// Session parameters captured in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Template path
    pub template: String,
    /// Rendered sub-template
    pub sub_template: String,
    /// Generated records
    pub item_count: usize,
    /// Timed renders
    pub run_count: usize,
    /// Untimed renders before measurement
    pub warmup_runs: usize,
    /// Record shape
    pub shape: ItemShape,
}

/// Assemble a report from a finished session and its summary
pub fn build_report(result: &SessionResult, summary: LatencySummary, template: &str) -> Report {
    Report {
        meta: ReportMeta {
            schema_version: REPORT_SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        },
        session: SessionInfo {
            template: template.to_string(),
            sub_template: result.plan.sub_template.clone(),
            item_count: result.plan.item_count,
            run_count: result.plan.run_count,
            warmup_runs: result.plan.warmup_runs,
            shape: result.plan.shape,
        },
        summary,
        render_failures: result.render_failures,
    }
}
