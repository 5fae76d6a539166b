use crate::server;
use clap::{Args, Parser, Subcommand};
use macro_compass::catalog::IndicatorCatalog;
use macro_compass::error::AppError;
use macro_compass::views::Rubric;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Macro Compass API",
    about = "Serve Macro Compass scorecards, comparisons, and explorer data over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect score catalogs before deploying them
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Validate a JSON score catalog and print the bands it defines
    Check(CatalogCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogCheckArgs {
    /// Path to the catalog document (`{"indicators": [...]}`)
    #[arg(long)]
    pub(crate) path: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => check_catalog(args),
    }
}

fn check_catalog(args: CatalogCheckArgs) -> Result<(), AppError> {
    let catalog = IndicatorCatalog::from_path(&args.path)?;
    let rubric = Rubric::from_catalog(&catalog);

    println!(
        "{}: {} indicators valid",
        args.path.display(),
        catalog.len()
    );
    for row in &rubric.rows {
        let bands: Vec<String> = row
            .bands
            .iter()
            .map(|cell| format!("{} {}", cell.grade, cell.range))
            .collect();
        println!("- {} ({}): {}", row.indicator, row.polarity_label, bands.join(" | "));
    }
    Ok(())
}
