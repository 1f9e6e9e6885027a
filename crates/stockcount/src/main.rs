use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use stockcount_core::db;
use stockcount_core::pipelines::export_from_source;
use stockcount_core::settings::ExportSettings;
use stockcount_core::store::SqliteCountStore;
use stockcount_core::types::ExportSummary;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock count spreadsheet exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export all stock counts to an .xlsx report
    Export(ExportArgs),
    /// Run database migrations
    Migrate,
    /// Print the number of stored stock counts
    Count,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Destination .xlsx file
    #[arg(short, long)]
    output: PathBuf,
    /// IANA timezone for exported timestamps (overrides config and STOCKCOUNT_TIMEZONE)
    #[arg(long)]
    timezone: Option<String>,
    /// Worksheet name (overrides config and STOCKCOUNT_SHEET_NAME)
    #[arg(long)]
    sheet_name: Option<String>,
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip running migrations before exporting
    #[arg(long)]
    skip_migrations: bool,
    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Export(args) => handle_export(args).await,
        Command::Migrate => {
            let pool = connect_pool().await?;
            db::run_migrations(&pool).await?;
            info!("Database migrations applied");
            Ok(())
        }
        Command::Count => {
            let store = SqliteCountStore::new(connect_pool().await?);
            let count = store.count_records().await?;
            println!("Total rows in stock_counts: {count}");
            Ok(())
        }
    }
}

async fn handle_export(args: ExportArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let pool = connect_pool().await?;

    if args.skip_migrations {
        warn!("Skipping migrations before export");
    } else {
        db::run_migrations(&pool).await?;
    }

    let store = SqliteCountStore::new(pool);
    let artifact = export_from_source(&store, &settings)
        .await
        .context("stock count export failed")?;

    std::fs::write(&args.output, &artifact.bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&artifact.summary)?);
    } else {
        println!("{}", summary_table(&artifact.summary));
    }
    info!(path = %args.output.display(), "Report written");
    Ok(())
}

fn resolve_settings(args: &ExportArgs) -> Result<ExportSettings> {
    let mut settings = ExportSettings::load(args.config.as_deref())
        .context("failed to load export settings")?;
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(sheet_name) = &args.sheet_name {
        settings.sheet_name = sheet_name.clone();
    }
    settings
        .resolve_timezone()
        .with_context(|| format!("unsupported timezone '{}'", settings.timezone))?;
    Ok(settings)
}

fn summary_table(summary: &ExportSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Rows"]);
    table.add_row(vec!["records read".to_string(), summary.total_records.to_string()]);
    table.add_row(vec!["rows exported".to_string(), summary.exported_rows.to_string()]);
    table.add_row(vec![
        "excluded (missing session)".to_string(),
        summary.excluded_missing_session.to_string(),
    ]);
    table.add_row(vec![
        "timestamps kept verbatim".to_string(),
        summary.passthrough_timestamps.to_string(),
    ]);
    table.add_row(vec![
        "no master quantity".to_string(),
        summary.missing_master_quantity.to_string(),
    ]);
    table
}

async fn connect_pool() -> Result<db::DbPool> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("STOCKCOUNT_DATABASE_URL"))
        .context("DATABASE_URL (or STOCKCOUNT_DATABASE_URL) must be set")?;
    db::connect(&database_url)
        .await
        .with_context(|| format!("failed to open database {database_url}"))
}
