//! Integration tests for tablebench
//!
//! These tests verify the end-to-end behavior of a benchmark session.

use std::path::{Path, PathBuf};
use tablebench::{
    Cli, ItemShape, MessageStyle, Outcome, OutputFormat, Render, SessionPlan, Settings,
    TableTemplate, TablebenchConfig, compute_summary, execute, generate_range, load_and_run,
};

const EMPTY_TABLE: &str = "{% macro table(items) %}{% endmacro %}";

fn shipped_template() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates/List.html")
}

fn settings(template: PathBuf, items: usize, runs: usize) -> Settings {
    Settings {
        template,
        plan: SessionPlan {
            item_count: items,
            run_count: runs,
            ..SessionPlan::default()
        },
        format: OutputFormat::Human,
        style: MessageStyle::Micros,
        output: None,
    }
}

fn stat(line: &str, label: &str) -> u64 {
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_suffix(" (micros)"))
        .unwrap_or_else(|| panic!("unexpected line: {line}"))
        .parse()
        .unwrap()
}

/// Reference scenario: 1000 items, 1000 runs, a table that renders nothing
#[test]
fn test_reference_session_with_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("List.html");
    std::fs::write(&template, EMPTY_TABLE).unwrap();

    let mut out = Vec::new();
    let outcome = execute(&settings(template, 1000, 1000), &mut out).unwrap();

    let report = match outcome {
        Outcome::Completed(report) => report,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(report.summary.sample_count, 1000);
    assert_eq!(report.render_failures, 0);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Table with 1000 items, 1000 runs:");

    let min = stat(lines[1], "Min: ");
    let max = stat(lines[2], "Max: ");
    let avg = stat(lines[3], "Average: ");
    assert!(min <= avg && avg <= max);
    assert_eq!(min, report.summary.min_micros);
}

/// Unresolvable template path: error text only, no statistics
#[test]
fn test_missing_template_reports_error_only() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist").join("List.html");

    let mut out = Vec::new();
    let outcome = execute(&settings(missing, 1000, 1000), &mut out).unwrap();
    assert!(matches!(outcome, Outcome::TemplateLoadFailed));

    let text = String::from_utf8(out).unwrap();
    assert!(!text.is_empty());
    for label in ["Table with", "Min:", "Max:", "Average:"] {
        assert!(!text.contains(label), "unexpected {label:?} in {text:?}");
    }
}

/// Syntax errors are load errors too
#[test]
fn test_malformed_template_reports_error_only() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("List.html");
    std::fs::write(&template, "{% macro table(items) %}{% if %}").unwrap();

    let mut out = Vec::new();
    let outcome = execute(&settings(template, 10, 10), &mut out).unwrap();
    assert!(matches!(outcome, Outcome::TemplateLoadFailed));

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("template: List.html:"));
    assert!(!text.contains("Min:"));
}

/// A blank template file is a load error, not an empty table
#[test]
fn test_empty_template_reports_error_only() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("List.html");
    std::fs::write(&template, "").unwrap();

    let mut out = Vec::new();
    let outcome = execute(&settings(template, 10, 5), &mut out).unwrap();
    assert!(matches!(outcome, Outcome::TemplateLoadFailed));

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "template: List.html: empty template\n");
}

/// The shipped template renders every record and customer
#[test]
fn test_shipped_template_renders_full_table() {
    let template = TableTemplate::from_path(shipped_template()).unwrap();
    let items = generate_range(1000, ItemShape::WithCustomer);

    let mut sink = Vec::new();
    template.render_to("table", &items, &mut sink).unwrap();
    let html = String::from_utf8(sink).unwrap();

    assert_eq!(html.matches("<tr>").count(), 1001);
    assert!(html.contains("<td>item 999</td>"));
    assert!(html.contains("<td>Customer Street 999</td>"));
    assert!(html.contains("Cust.omer0@email.com"));
    assert!(html.contains("<td>100.01</td>"));
}

#[test]
fn test_shipped_template_plain_shape() {
    let template = TableTemplate::from_path(shipped_template()).unwrap();
    let items = generate_range(3, ItemShape::Plain);

    let mut sink = Vec::new();
    template.render_to("table", &items, &mut sink).unwrap();
    let html = String::from_utf8(sink).unwrap();

    assert_eq!(html.matches("<td colspan=\"6\"></td>").count(), 3);
    assert!(!html.contains("mailto:"));
}

/// Unknown sub-template: every render fails, every run is still timed
#[test]
fn test_failed_renders_are_timed_and_counted() {
    let plan = SessionPlan {
        item_count: 10,
        run_count: 40,
        sub_template: "rows".to_string(),
        ..SessionPlan::default()
    };

    let result = load_and_run(shipped_template(), &plan).unwrap();
    assert_eq!(result.measurements.len(), 40);
    assert_eq!(result.render_failures, 40);

    let summary = compute_summary(result.measurements.as_slice()).unwrap();
    assert!(summary.min_micros <= summary.average_micros);
    assert!(summary.average_micros <= summary.max_micros);
}

#[test]
fn test_json_output_and_bare_style() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("List.html");
    std::fs::write(&template, EMPTY_TABLE).unwrap();

    let mut json_settings = settings(template.clone(), 25, 5);
    json_settings.format = OutputFormat::Json;
    json_settings.plan.shape = ItemShape::Plain;
    json_settings.plan.warmup_runs = 2;

    let mut out = Vec::new();
    execute(&json_settings, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["session"]["item_count"], 25);
    assert_eq!(value["session"]["run_count"], 5);
    assert_eq!(value["session"]["warmup_runs"], 2);
    assert_eq!(value["session"]["shape"], "plain");
    assert_eq!(value["summary"]["sample_count"], 5);

    let mut bare = settings(template, 25, 5);
    bare.style = MessageStyle::Bare;
    let mut out = Vec::new();
    execute(&bare, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(!text.contains("(micros)"));
    assert!(text.lines().nth(1).unwrap().starts_with("Min: "));
}

#[test]
fn test_config_file_drives_settings() {
    use clap::Parser;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tablebench.toml");
    std::fs::write(
        &config_path,
        "[runner]\nitem_count = 12\nrun_count = 3\nshape = \"plain\"\n\n[output]\nstyle = \"bare\"\n",
    )
    .unwrap();

    let config = TablebenchConfig::load(&config_path).unwrap();
    let cli = Cli::parse_from(["tablebench", "--items", "20"]);
    let settings = Settings::resolve(&cli, &config).unwrap();

    assert_eq!(settings.plan.item_count, 20);
    assert_eq!(settings.plan.run_count, 3);
    assert_eq!(settings.plan.shape, ItemShape::Plain);
    assert_eq!(settings.style, MessageStyle::Bare);
}
