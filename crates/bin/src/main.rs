//! Pegboard CLI binary.
//!
//! Fetches fundamentals for a watchlist and prints valuation and growth ratio tables.

mod integration;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use integration::pipeline::{compute_rows, fetch_snapshots, reorder_rows};
use integration::settings::{default_config_path, init_config, load_config};
use pegboard::{AppConfig, Watchlist};
use pegboard_data::{InMemorySource, QuoteSource, YahooFundamentalsProvider, dump_raw_json};
use pegboard_output::{
    ColumnSet, ComparisonTable, ExportFormat, Exporter, InspectionReport, MetricsExport,
    ReportBuilder, legend_for, metrics_to_dataframe, tickers_sorted_by,
};
use pegboard_ratios::{DerivedMetrics, PegDenominator, RatioEngine, registry::get_metric_info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pegboard")]
#[command(about = "Pegboard: valuation and growth ratios for stock watchlists", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/pegboard/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare ratios across a set of tickers
    Compare {
        /// Tickers to compare (default: configured watchlist)
        tickers: Vec<String>,

        /// Watchlist JSON file
        #[arg(long, conflicts_with = "tickers")]
        watchlist: Option<PathBuf>,

        /// Table title
        #[arg(long)]
        title: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Grid)]
        format: OutputFormat,

        /// Column set (valuation, growth, all)
        #[arg(long, default_value = "valuation", value_parser = parse_columns)]
        columns: ColumnSet,

        /// PEG denominator unit (percentage or fraction)
        #[arg(long, value_parser = parse_peg_unit)]
        peg_unit: Option<PegDenominator>,

        /// Damping applied to trailing growth for forward EPS
        #[arg(long)]
        damping: Option<f64>,

        /// Never substitute provider-reported EPS or P/E
        #[arg(long)]
        no_api_fallback: bool,

        /// Maximum concurrent fetches
        #[arg(long)]
        concurrency: Option<usize>,

        /// Sort rows by a metric name (e.g. pe, trailing_peg)
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort_by")]
        descending: bool,

        /// Read snapshots from a JSON file instead of Yahoo Finance
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Save fetched snapshots to a JSON file
        #[arg(long)]
        save_snapshots: Option<PathBuf>,

        /// Export metrics to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show provider data and computed ratios for one ticker
    Inspect {
        /// Stock symbol
        ticker: String,

        /// Directory for the raw JSON dump
        #[arg(long, default_value = ".")]
        dump_dir: PathBuf,

        /// Skip the raw JSON dump
        #[arg(long)]
        no_dump: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Read snapshots from a JSON file instead of Yahoo Finance
        #[arg(long)]
        snapshots: Option<PathBuf>,
    },

    /// Print column descriptions
    Legend {
        /// Column set (valuation, growth, all)
        #[arg(long, default_value = "valuation", value_parser = parse_columns)]
        columns: ColumnSet,
    },

    /// Show or create the config file
    Config {
        /// Write the default config
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Grid,
    Markdown,
    Csv,
    Json,
}

fn parse_columns(name: &str) -> Result<ColumnSet, String> {
    ColumnSet::from_name(name)
        .ok_or_else(|| format!("unknown column set '{name}' (valuation, growth, all)"))
}

fn parse_peg_unit(name: &str) -> Result<PegDenominator, String> {
    PegDenominator::from_name(name)
        .ok_or_else(|| format!("unknown PEG unit '{name}' (percentage, fraction)"))
}

struct CompareArgs {
    tickers: Vec<String>,
    watchlist: Option<PathBuf>,
    title: Option<String>,
    format: OutputFormat,
    columns: ColumnSet,
    peg_unit: Option<PegDenominator>,
    damping: Option<f64>,
    no_api_fallback: bool,
    concurrency: Option<usize>,
    sort_by: Option<String>,
    descending: bool,
    snapshots: Option<PathBuf>,
    save_snapshots: Option<PathBuf>,
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    integration::logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Compare {
            tickers,
            watchlist,
            title,
            format,
            columns,
            peg_unit,
            damping,
            no_api_fallback,
            concurrency,
            sort_by,
            descending,
            snapshots,
            save_snapshots,
            export,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let args = CompareArgs {
                tickers,
                watchlist,
                title,
                format,
                columns,
                peg_unit,
                damping,
                no_api_fallback,
                concurrency,
                sort_by,
                descending,
                snapshots,
                save_snapshots,
                export,
            };
            compare(config, args).await?;
        }
        Commands::Inspect {
            ticker,
            dump_dir,
            no_dump,
            report,
            snapshots,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let dump_dir = (!no_dump).then_some(dump_dir);
            inspect(
                &config,
                &ticker,
                dump_dir.as_deref(),
                report.as_deref(),
                snapshots.as_deref(),
            )
            .await?;
        }
        Commands::Legend { columns } => {
            print!("{}", legend_for(&columns.columns()));
        }
        Commands::Config { init, force } => {
            show_or_init_config(cli.config.as_deref(), init, force)?;
        }
    }

    Ok(())
}

/// Build the quote source: a snapshot file when given, otherwise Yahoo Finance.
fn open_source(
    config: &AppConfig,
    snapshots: Option<&Path>,
) -> Result<Box<dyn QuoteSource>, Box<dyn std::error::Error>> {
    match snapshots {
        Some(path) => {
            let source = InMemorySource::from_json_file(path)?;
            tracing::info!(path = %path.display(), tickers = source.tickers().len(), "loaded snapshots");
            Ok(Box::new(source))
        }
        None => Ok(Box::new(YahooFundamentalsProvider::with_rate_limit(
            config.rate_limit(),
        )?)),
    }
}

/// Apply CLI overrides on top of the loaded config.
fn engine_for(config: &AppConfig, args: &CompareArgs) -> RatioEngine {
    let mut ratios = config.ratios.clone();
    if let Some(unit) = args.peg_unit {
        ratios.peg_denominator = unit;
    }
    if let Some(damping) = args.damping {
        ratios.forward_growth_damping = damping;
    }
    if args.no_api_fallback {
        ratios.api_fallback = false;
    }
    RatioEngine::with_config(ratios)
}

fn resolve_watchlist(
    config: &AppConfig,
    args: &CompareArgs,
) -> Result<Watchlist, Box<dyn std::error::Error>> {
    let watchlist = if !args.tickers.is_empty() {
        Watchlist::new(config.watchlist.title(), &args.tickers)?
    } else if let Some(path) = &args.watchlist {
        Watchlist::from_json_file(path)?
    } else {
        config.watchlist.clone()
    };

    Ok(match &args.title {
        Some(title) => watchlist.with_title(title.clone()),
        None => watchlist,
    })
}

fn progress_bar(len: usize) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

async fn compare(config: AppConfig, args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(damping) = args.damping
        && (!damping.is_finite() || damping < 0.0)
    {
        return Err(format!("--damping must be a non-negative number, got {damping}").into());
    }
    if let Some(metric) = &args.sort_by
        && get_metric_info(metric).is_none()
    {
        return Err(format!("unknown metric '{metric}' for --sort-by").into());
    }

    let watchlist = resolve_watchlist(&config, &args)?;
    let engine = engine_for(&config, &args);
    let concurrency = args.concurrency.unwrap_or(config.concurrency).max(1);
    let source = open_source(&config, args.snapshots.as_deref())?;

    tracing::info!(
        title = watchlist.title(),
        tickers = watchlist.tickers().len(),
        source = source.name(),
        "comparing"
    );

    let pb = progress_bar(watchlist.tickers().len())?;
    pb.set_message("Fetching fundamentals...");
    let outcome = fetch_snapshots(source.as_ref(), watchlist.tickers(), concurrency, Some(&pb)).await;
    pb.finish_and_clear();

    let outcome = outcome.require_any()?;
    if !outcome.failures.is_empty() {
        let skipped: Vec<&str> = outcome.failures.iter().map(|(t, _)| t.as_str()).collect();
        tracing::warn!(skipped = ?skipped, "some tickers were skipped");
    }

    if let Some(path) = &args.save_snapshots {
        std::fs::write(path, serde_json::to_string_pretty(&outcome.snapshots)?)?;
        tracing::info!(path = %path.display(), "saved snapshots");
    }

    let mut rows = compute_rows(&engine, &outcome.snapshots);
    if let Some(metric) = &args.sort_by {
        let df = metrics_to_dataframe(&rows)?;
        let order = tickers_sorted_by(&df, metric, args.descending)?;
        rows = reorder_rows(rows, &order);
    }

    if let Some(path) = &args.export {
        let format = ExportFormat::from_path(path)?;
        MetricsExport::from_rows(&rows).export_to_file(path, format)?;
        tracing::info!(path = %path.display(), "exported metrics");
    }

    print_rows(watchlist.title(), args.columns, args.format, rows)
}

fn print_rows(
    title: &str,
    columns: ColumnSet,
    format: OutputFormat,
    rows: Vec<(String, DerivedMetrics)>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Grid => {
            let table = ComparisonTable::new(title, columns.columns()).with_rows(rows);
            println!("{table}");
        }
        OutputFormat::Markdown => {
            let table = ComparisonTable::new(title, columns.columns()).with_rows(rows);
            println!("{}", table.to_markdown());
            println!("{}", table.legend());
        }
        OutputFormat::Csv => {
            print!("{}", MetricsExport::from_rows(&rows).export_to_string(ExportFormat::Csv)?);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                MetricsExport::from_rows(&rows).export_to_string(ExportFormat::PrettyJson)?
            );
        }
    }
    Ok(())
}

async fn inspect(
    config: &AppConfig,
    ticker: &str,
    dump_dir: Option<&Path>,
    report: Option<&Path>,
    snapshots: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticker = pegboard_data::normalize_ticker(ticker)?;
    let source = open_source(config, snapshots)?;

    if let Some(dir) = dump_dir {
        let raw = source.fetch_raw(&ticker).await?;
        let path = dump_raw_json(dir, &ticker, &raw)?;
        println!("Raw data saved to {}", path.display());
        println!();
    }

    let snapshot = source.fetch_snapshot(&ticker).await?;
    let metrics = RatioEngine::with_config(config.ratios.clone()).compute(&snapshot);
    let inspection = InspectionReport::new(snapshot, metrics);
    print!("{inspection}");

    if let Some(path) = report {
        ReportBuilder::new()
            .title(format!("Inspection of {ticker}"))
            .ticker(ticker.as_str())
            .contents(&inspection)?
            .build()?
            .write_to_file(path)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn show_or_init_config(
    explicit: Option<&Path>,
    init: bool,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = explicit.map_or_else(default_config_path, Path::to_path_buf);

    if init {
        init_config(&path, force)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(explicit)?;
    let source = if path.exists() { "file" } else { "defaults" };
    println!("# {} ({source})", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
