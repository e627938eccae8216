use crate::analyzers::UsageAnalyzer;
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::models::{Column, DailyRecord, Month};
use crate::processors::IntegrityChecker;
use crate::readers::DayReader;
use crate::utils::filename::generate_default_report_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::DashboardWriter;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| AnalyticsError::Config(format!("Failed to initialise logging: {}", e)))
}

fn load_records(
    config: &AnalyticsConfig,
    input: Option<PathBuf>,
    strict: bool,
) -> Result<Vec<DailyRecord>> {
    let path = input.unwrap_or_else(|| config.input_path.clone());
    let reader = DayReader::with_strict_categories(strict || config.strict_categories);
    reader.read_records(&path)
}

fn analyzer_for(config: &AnalyticsConfig) -> UsageAnalyzer {
    UsageAnalyzer::new()
        .with_temperature_scale(config.temperature_scale)
        .with_histogram_bins(config.histogram_bins)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = AnalyticsConfig::load(cli.config.as_deref())?;
    debug!("Using input path {}", config.input_path.display());

    let analyzer = analyzer_for(&config);
    let writer = DashboardWriter::new();

    match cli.command {
        Commands::Dashboard {
            input,
            format,
            output,
            strict,
            quiet,
        } => {
            let progress = ProgressReporter::new_spinner("Loading daily records...", quiet);
            let records = load_records(&config, input, strict)?;

            progress.set_message(&format!("Summarizing {} records...", records.len()));
            let dashboard = analyzer.build_dashboard(&records)?;
            progress.finish_and_clear();

            match format {
                OutputFormat::Text => match output {
                    Some(path) => {
                        writer.write_text(&dashboard, &path)?;
                        println!("Dashboard written to {}", path.display());
                    }
                    None => print!("{}", writer.render_text(&dashboard)),
                },
                OutputFormat::Json => {
                    let path = output
                        .unwrap_or_else(|| generate_default_report_filename(&config.output_dir));
                    writer.write_json(&dashboard, &path)?;
                    println!("Dashboard written to {}", path.display());
                }
            }
        }

        Commands::Seasons { input, strict } => {
            let records = load_records(&config, input, strict)?;
            let summary = analyzer.summarize_by_season(&records);
            let top = analyzer.top_season(&summary)?;

            println!("{}", writer.render_season_table(&summary));
            println!("{}", writer.render_top_season(&top));
            print!("{}", writer.render_season_chart(&summary));
        }

        Commands::Months { input, strict } => {
            let records = load_records(&config, input, strict)?;
            let summary = analyzer.summarize_by_month(&records);
            let (top, stats) = analyzer.top_month(&summary)?;

            println!("{}", writer.render_month_table(&summary));
            print!("{}", writer.render_top_month(&top, &stats));
        }

        Commands::Describe {
            input,
            month,
            columns,
            strict,
        } => {
            let records = load_records(&config, input, strict)?;
            let columns = Column::parse_list(&columns)?;

            let month = match month {
                Some(label) => label.parse::<Month>()?,
                None => {
                    let summary = analyzer.summarize_by_month(&records);
                    analyzer.top_month(&summary)?.0.month
                }
            };

            let month_records = analyzer.filter_by_month(&records, month);
            info!("{} records fall in {}", month_records.len(), month);

            let description = analyzer.describe(&month_records, &columns)?;
            println!("Conditions in {} ({} days)", month, month_records.len());
            print!("{}", writer.render_description(&description));
        }

        Commands::Validate { input } => {
            let records = load_records(&config, input, false)?;

            let checker = IntegrityChecker::new();
            let report = checker.check_integrity(&records);
            println!("{}", checker.generate_summary(&report));

            if report.is_clean() {
                println!("✅ All records passed integrity checks");
            } else {
                println!("⚠️  Found {} integrity issues", report.violations.len());
            }
        }
    }

    Ok(())
}
