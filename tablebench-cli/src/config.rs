//! Configuration loading from tablebench.toml
//!
//! Configuration can be specified in a `tablebench.toml` file. The file is
//! discovered by walking up from the current directory, or passed explicitly
//! with `--config`. Every key is optional; missing keys take the defaults of
//! the reference benchmark (1000 items, 1000 runs, `List.html`, sub-template
//! `table`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tablebench_core::{DEFAULT_ITEM_COUNT, DEFAULT_RUN_COUNT, DEFAULT_SUB_TEMPLATE, ItemShape};
use tablebench_report::MessageStyle;

/// File name looked up by [`TablebenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "tablebench.toml";

/// tablebench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TablebenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Template configuration
    #[serde(default)]
    pub template: TemplateConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Session parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Records generated for the session
    #[serde(default = "default_item_count")]
    pub item_count: usize,
    /// Timed render iterations
    #[serde(default = "default_run_count")]
    pub run_count: usize,
    /// Untimed renders before measurement
    #[serde(default)]
    pub warmup_runs: usize,
    /// Record shape: "with-customer" or "plain"
    #[serde(default)]
    pub shape: ItemShape,
    /// Sub-template rendered by every iteration
    #[serde(default = "default_sub_template")]
    pub sub_template: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            item_count: default_item_count(),
            run_count: default_run_count(),
            warmup_runs: 0,
            shape: ItemShape::default(),
            sub_template: default_sub_template(),
        }
    }
}

fn default_item_count() -> usize {
    DEFAULT_ITEM_COUNT
}
fn default_run_count() -> usize {
    DEFAULT_RUN_COUNT
}
fn default_sub_template() -> String {
    DEFAULT_SUB_TEMPLATE.to_string()
}

/// Template location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateConfig {
    /// Template file, relative to the working directory
    #[serde(default = "default_template_path")]
    pub path: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: default_template_path(),
        }
    }
}

fn default_template_path() -> PathBuf {
    PathBuf::from("List.html")
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Statistic line style: "micros" or "bare"
    #[serde(default)]
    pub style: MessageStyle,
    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            style: MessageStyle::default(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl TablebenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Walk up from `start` and load the first `tablebench.toml` found
    pub fn discover_from(start: impl AsRef<Path>) -> anyhow::Result<Option<(PathBuf, Self)>> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::load(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let dir = std::env::current_dir()?;
        Self::discover_from(dir)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# tablebench configuration

[runner]
# Records generated once per session
item_count = 1000
# Timed render iterations
run_count = 1000
# Untimed renders before measurement
warmup_runs = 0
# Record shape: "with-customer" or "plain"
shape = "with-customer"
# Sub-template rendered by every iteration
sub_template = "table"

[template]
# Template file, relative to the working directory
path = "List.html"

[output]
# Output format: human, json
format = "human"
# Statistic line style: "micros" appends " (micros)", "bare" omits it
style = "micros"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/tablebench/report.json"
"#
        .to_string()
    }
}
