#![warn(missing_docs)]
//! tablebench Report - Session Output
//!
//! Generates the output formats of a finished session:
//! - Human (the four-line summary printed to stdout)
//! - JSON (machine-readable, full session context)

mod human;
mod json;
mod report;

pub use human::{MessageStyle, format_human_output};
pub use json::{ReportSchema, generate_json_report};
pub use report::{REPORT_SCHEMA_VERSION, Report, ReportMeta, SessionInfo, build_report};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    #[default]
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render `report` in the requested format
pub fn render_report(
    report: &Report,
    format: OutputFormat,
    style: MessageStyle,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(format_human_output(report, style)),
        OutputFormat::Json => generate_json_report(report).map(|mut s| {
            s.push('\n');
            s
        }),
    }
}
