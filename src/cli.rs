use crate::completeness::{CompletenessScorer, ScoringPolicy};
use crate::config::{Config, load_config};
use crate::layout::compute_layouts;
use crate::layout_dump::{DashboardDump, write_dump};
use crate::parser::{parse_chart_descriptors, parse_project_record};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "plandash",
    version,
    about = "Completeness scores and chart geometry for project-planning dashboards"
)]
pub struct Args {
    /// Config JSON file (theme, palette, scoring, donut/gauge tuning)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score how complete a project record is
    Score {
        /// Project record (.json/.json5) or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Aggregation policy (defaults to the config file, then binary)
        #[arg(short = 'p', long = "policy", value_enum)]
        policy: Option<ScoringPolicy>,

        /// Print the per-section report as JSON instead of the bare percentage
        #[arg(long = "report")]
        report: bool,
    },
    /// Compute chart geometry for a list of chart descriptors
    Layout {
        /// Chart descriptors (.json/.json5) or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Output JSON file. Defaults to stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Target chart height in pixels
        #[arg(short = 'H', long = "height")]
        height: Option<f64>,

        /// Project record to score alongside the charts
        #[arg(short = 'r', long = "record")]
        record: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Score {
            input,
            policy,
            report,
        } => run_score(&config, input.as_deref(), policy, report),
        Command::Layout {
            input,
            output,
            height,
            record,
        } => run_layout(
            &config,
            input.as_deref(),
            output.as_deref(),
            height,
            record.as_deref(),
        ),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run_score(
    config: &Config,
    input: Option<&Path>,
    policy: Option<ScoringPolicy>,
    report: bool,
) -> Result<()> {
    let record = parse_project_record(&read_input(input)?)?;
    let mut scoring = config.scoring.clone();
    if let Some(policy) = policy {
        scoring.policy = policy;
    }
    let scorer = CompletenessScorer::from_config(&scoring);
    let result = scorer.report(&record);
    info!(
        policy = ?result.policy,
        percentage = result.percentage,
        sections = result.sections.len(),
        "scored project record"
    );
    if report {
        write_dump(&result, None)?;
    } else {
        println!("{}", result.percentage);
    }
    Ok(())
}

fn run_layout(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    height: Option<f64>,
    record: Option<&Path>,
) -> Result<()> {
    let charts = parse_chart_descriptors(&read_input(input)?)?;
    if charts.is_empty() {
        return Err(anyhow::anyhow!("No chart descriptors found in input"));
    }
    let height = height.unwrap_or(config.layout.chart_height);
    let layouts = compute_layouts(&charts, height, &config.theme, &config.layout);
    let completeness = match record {
        Some(path) => {
            let record = parse_project_record(&std::fs::read_to_string(path)?)?;
            Some(CompletenessScorer::from_config(&config.scoring).report(&record))
        }
        None => None,
    };
    let mut dump = DashboardDump::new(&config.theme.name, height, &layouts);
    if let Some(report) = completeness.as_ref() {
        dump = dump.with_completeness(report);
    }
    info!(
        charts = layouts.len(),
        unsupported = dump.unsupported,
        "computed chart layouts"
    );
    write_dump(&dump, output)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
