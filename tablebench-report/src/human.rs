//! Output Formatting
//!
//! The human format is exactly four lines:
//!
//! ```text
//! Table with 1000 items, 1000 runs:
//! Min: 812 (micros)
//! Max: 2031 (micros)
//! Average: 870 (micros)
//! ```

use crate::report::Report;
use serde::{Deserialize, Serialize};

/// Whether statistic lines carry a unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStyle {
    /// `Min: 812 (micros)`
    #[default]
    Micros,
    /// `Min: 812`
    Bare,
}

impl MessageStyle {
    fn suffix(self) -> &'static str {
        match self {
            MessageStyle::Micros => " (micros)",
            MessageStyle::Bare => "",
        }
    }
}

impl std::str::FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "micros" => Ok(MessageStyle::Micros),
            "bare" => Ok(MessageStyle::Bare),
            other => Err(format!("Unknown message style: {}", other)),
        }
    }
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report, style: MessageStyle) -> String {
    let suffix = style.suffix();
    let summary = &report.summary;

    format!(
        "Table with {} items, {} runs:\nMin: {}{suffix}\nMax: {}{suffix}\nAverage: {}{suffix}\n",
        report.session.item_count,
        report.session.run_count,
        summary.min_micros,
        summary.max_micros,
        summary.average_micros,
    )
}
