use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mindmetrics::{
    OutputFormat, Page, Report, ScenarioFile, ScenarioOverrides, init_logging, load_dataset,
    load_scenario,
};
use mindmetrics_core::CorrelationCache;

#[derive(Parser, Debug)]
#[command(name = "mindmetrics")]
#[command(about = "Workplace mental-health survey metrics")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Survey dataset, a JSON array of rows
    #[arg(short = 'i', long)]
    dataset: PathBuf,

    /// Scenario file with `params:` and `policy:` sections
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Path to the data directory (default: ~/.mindmetrics/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    overrides: ScenarioOverrides,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Dataset summary, treatment trend and workplace support
    Overview,
    /// Cross-tabs, interference distribution and correlations
    Diagnostics,
    /// Risk scores and scenario projections
    Insights,
    /// Every page
    All,
}

impl From<Command> for Page {
    fn from(command: Command) -> Self {
        match command {
            Command::Overview => Page::Overview,
            Command::Diagnostics => Page::Diagnostics,
            Command::Insights => Page::Insights,
            Command::All => Page::All,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mindmetrics")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => ScenarioFile::default(),
    };
    scenario.apply(&args.overrides)?;

    let dataset = load_dataset(&args.dataset)?;
    let page = args.command.map_or(Page::All, Page::from);

    let mut cache = CorrelationCache::new();
    let report = Report::build(
        &dataset,
        &mut cache,
        &scenario.params,
        &scenario.policy,
        page,
    )?;
    println!("{}", report.render(args.format)?);

    tracing::info!(?page, records = dataset.len(), "report rendered");
    Ok(())
}
