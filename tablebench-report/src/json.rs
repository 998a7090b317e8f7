//! JSON Output

use crate::report::Report;
use serde::{Deserialize, Serialize};

/// Schema information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchema {
    /// Schema identifier
    pub schema: String,
    /// Schema version
    pub version: u32,
}

impl Default for ReportSchema {
    fn default() -> Self {
        Self {
            schema: "tablebench-report".to_string(),
            version: crate::REPORT_SCHEMA_VERSION,
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "$schema")]
    schema: ReportSchema,
    #[serde(flatten)]
    report: &'a Report,
}

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Document {
        schema: ReportSchema::default(),
        report,
    })
}
