mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use macro_compass::config::AppConfig;
use macro_compass::error::AppError;
use macro_compass::grading::{Grade, GradingEngine};
use macro_compass::series::YearRange;
use macro_compass::telemetry;
use macro_compass::views::{
    load_catalog, ExplorerRequest, LiveCompassService, Rubric, SelectionPolicy, ViewError,
};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "macro-compass",
    about = "Grade and explore macroeconomic indicators from World Bank open data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grade one country's macro indicators
    Scorecard(ScorecardArgs),
    /// Grade two countries side by side
    Compare(CompareArgs),
    /// Chart raw indicator series for up to three countries
    Explore(ExploreArgs),
    /// Show the bands each indicator is graded against
    Rubric,
    /// Grade a single value without fetching any data
    Classify(ClassifyArgs),
}

/// Output of the graded views, which have no tabular form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Explorer output; panels are tables, so CSV is offered here only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
struct ScorecardArgs {
    /// Country name or provider code (e.g. Vietnam or VN)
    #[arg(long)]
    country: String,
    /// Grade this year instead of the latest available observation
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[arg(long)]
    left: String,
    #[arg(long)]
    right: String,
    /// Grade this year instead of the latest available observation
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Args, Debug)]
struct ExploreArgs {
    /// Repeat for several countries; defaults to Vietnam
    #[arg(long = "country")]
    countries: Vec<String>,
    /// First year of the range (defaults to the configured range start)
    #[arg(long)]
    start: Option<i32>,
    /// Last year of the range (defaults to the configured range end)
    #[arg(long)]
    end: Option<i32>,
    /// Repeat to restrict the charted series; defaults to all of them
    #[arg(long = "indicator")]
    indicators: Vec<String>,
    #[arg(long, value_enum, default_value_t = TableFormat::Text)]
    format: TableFormat,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Score indicator name, e.g. "GDP Growth (%)"
    #[arg(long)]
    indicator: String,
    #[arg(long, allow_hyphen_values = true)]
    value: f64,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    indicator: &'a str,
    value: f64,
    grade: Grade,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, command = ?cli.command, "cli starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Scorecard(args) => {
            let service = LiveCompassService::from_config(&config)?;
            let card = service
                .scorecard(&args.country, SelectionPolicy::from_year(args.year))
                .await?;
            match args.format {
                ReportFormat::Json => print_json(&mut out, &card)?,
                ReportFormat::Text => render::scorecard(&mut out, &card)?,
            }
        }
        Command::Compare(args) => {
            let service = LiveCompassService::from_config(&config)?;
            let comparison = service
                .comparison(&args.left, &args.right, SelectionPolicy::from_year(args.year))
                .await?;
            match args.format {
                ReportFormat::Json => print_json(&mut out, &comparison)?,
                ReportFormat::Text => render::comparison(&mut out, &comparison)?,
            }
        }
        Command::Explore(args) => {
            let service = LiveCompassService::from_config(&config)?;
            let years = explore_years(&args, config.explorer.default_range)?;
            let view = service
                .explorer(ExplorerRequest {
                    countries: args.countries,
                    years,
                    indicators: args.indicators,
                })
                .await?;
            match args.format {
                TableFormat::Text => render::explorer(&mut out, &view)?,
                TableFormat::Json => print_json(&mut out, &view)?,
                TableFormat::Csv => render::explorer_csv(&mut out, &view)?,
            }
        }
        Command::Rubric => {
            let catalog = load_catalog(&config.scoring)?;
            render::rubric(&mut out, &Rubric::from_catalog(&catalog))?;
        }
        Command::Classify(args) => {
            let engine = GradingEngine::new(Arc::new(load_catalog(&config.scoring)?));
            let grade = engine
                .classify(&args.indicator, args.value)
                .map_err(ViewError::from)?;
            match args.format {
                ReportFormat::Json => print_json(
                    &mut out,
                    &ClassifyOutput {
                        indicator: &args.indicator,
                        value: args.value,
                        grade,
                    },
                )?,
                ReportFormat::Text => {
                    writeln!(out, "{}: {} -> {}", args.indicator, args.value, grade)?
                }
            }
        }
    }

    Ok(())
}

fn explore_years(args: &ExploreArgs, default_range: YearRange) -> Result<Option<YearRange>, ViewError> {
    match (args.start, args.end) {
        (None, None) => Ok(None),
        (start, end) => Ok(Some(YearRange::new(
            start.unwrap_or(default_range.start),
            end.unwrap_or(default_range.end),
        )?)),
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
