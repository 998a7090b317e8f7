#![warn(missing_docs)]
//! tablebench CLI Library
//!
//! Command line front end for a tablebench session: argument parsing,
//! `tablebench.toml` configuration, logging setup and report output.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     match tablebench_cli::run() {
//!         Ok(outcome) => outcome.exit_code(),
//!         Err(e) => {
//!             eprintln!("Error: {e:#}");
//!             std::process::ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```

mod config;

pub use config::*;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tablebench_core::{ItemShape, SessionError, SessionPlan, load_and_run};
use tablebench_report::{MessageStyle, OutputFormat, Report, build_report, render_report};
use tablebench_stats::compute_summary;

/// tablebench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tablebench")]
#[command(author, version, about = "tablebench - template rendering latency benchmark")]
pub struct Cli {
    /// Optional subcommand (Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Template file (default: List.html)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Number of generated records
    #[arg(long)]
    pub items: Option<usize>,

    /// Number of timed renders
    #[arg(long, short = 'n')]
    pub runs: Option<usize>,

    /// Untimed renders before measurement
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Record shape: with-customer, plain
    #[arg(long)]
    pub shape: Option<ItemShape>,

    /// Sub-template to render
    #[arg(long)]
    pub sub_template: Option<String>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Statistic line style: micros, bare
    #[arg(long)]
    pub style: Option<MessageStyle>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: discover tablebench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a benchmark session (default)
    Run,
    /// Write a default tablebench.toml
    Init {
        /// Destination path
        #[arg(default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Fully resolved session settings (CLI > config file > defaults)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Template file
    pub template: PathBuf,
    /// Session parameters
    pub plan: SessionPlan,
    /// Output format
    pub format: OutputFormat,
    /// Statistic line style
    pub style: MessageStyle,
    /// Report destination; stdout when `None`
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Merge CLI flags over a loaded configuration
    pub fn resolve(cli: &Cli, config: &TablebenchConfig) -> anyhow::Result<Self> {
        let format = cli
            .format
            .as_deref()
            .unwrap_or(&config.output.format)
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let plan = SessionPlan {
            item_count: cli.items.unwrap_or(config.runner.item_count),
            run_count: cli.runs.unwrap_or(config.runner.run_count),
            warmup_runs: cli.warmup.unwrap_or(config.runner.warmup_runs),
            shape: cli.shape.unwrap_or(config.runner.shape),
            sub_template: cli
                .sub_template
                .clone()
                .unwrap_or_else(|| config.runner.sub_template.clone()),
        };
        plan.validate()?;

        Ok(Self {
            template: cli
                .template
                .clone()
                .unwrap_or_else(|| config.template.path.clone()),
            plan,
            format,
            style: cli.style.unwrap_or(config.output.style),
            output: cli.output.clone().or_else(|| config.output.path.clone()),
        })
    }
}

/// How a CLI invocation ended
#[derive(Debug)]
pub enum Outcome {
    /// All runs completed and the report was written
    Completed(Box<Report>),
    /// The template could not be loaded; nothing was measured
    TemplateLoadFailed,
    /// A default configuration file was written
    Initialized(PathBuf),
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Completed(_) | Outcome::Initialized(_) => ExitCode::SUCCESS,
            Outcome::TemplateLoadFailed => ExitCode::FAILURE,
        }
    }
}

/// Run the tablebench CLI with the process arguments.
pub fn run() -> anyhow::Result<Outcome> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the tablebench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<Outcome> {
    init_logging(cli.verbose);

    if let Some(Commands::Init { path, force }) = &cli.command {
        return write_default_config(path, *force);
    }

    let config = match &cli.config {
        Some(path) => TablebenchConfig::load(path)?,
        None => match TablebenchConfig::discover()? {
            Some((path, config)) => {
                tracing::debug!(path = %path.display(), "using configuration");
                config
            }
            None => TablebenchConfig::default(),
        },
    };

    let settings = Settings::resolve(&cli, &config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&settings, &mut out)
}

/// Logs go to stderr; stdout carries only the report.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "tablebench=debug"
    } else {
        "tablebench=info"
    };
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<Outcome> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, TablebenchConfig::default_toml())?;
    tracing::info!(path = %path.display(), "configuration written");
    Ok(Outcome::Initialized(path.to_path_buf()))
}

/// Run one session and write its report to `out` (or `settings.output`).
///
/// A template load failure writes the error text to `out` and returns
/// [`Outcome::TemplateLoadFailed`] without measuring anything.
pub fn execute(settings: &Settings, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let result = match load_and_run(&settings.template, &settings.plan) {
        Ok(result) => result,
        Err(SessionError::Load(err)) => {
            tracing::error!(template = %settings.template.display(), "template load failed");
            writeln!(out, "{}", err)?;
            return Ok(Outcome::TemplateLoadFailed);
        }
        Err(err) => return Err(err.into()),
    };

    let summary = compute_summary(result.measurements.as_slice())?;
    tracing::info!(
        min = summary.min_micros,
        max = summary.max_micros,
        average = summary.average_micros,
        "session complete"
    );

    let report = build_report(&result, summary, &settings.template.display().to_string());
    let rendered = render_report(&report, settings.format, settings.style)?;

    match &settings.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => out.write_all(rendered.as_bytes())?,
    }

    Ok(Outcome::Completed(Box::new(report)))
}
