use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-analytics")]
#[command(about = "Seasonal and monthly usage analytics for the bike-sharing dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: bikeshare.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the full usage dashboard
    Dashboard {
        #[arg(short, long, help = "Input day.csv file [default: configured input_path]")]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(
            short,
            long,
            help = "Output file [default: stdout for text, output/bikeshare-report-{YYMMDD}.json for json]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Reject season/month codes outside the label maps")]
        strict: bool,

        #[arg(long, help = "Hide the progress spinner")]
        quiet: bool,
    },

    /// Show usage totals per season
    Seasons {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        strict: bool,
    },

    /// Show usage totals and average conditions per month
    Months {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        strict: bool,
    },

    /// Describe conditions (mean/max/min) for one month
    Describe {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Month label or code (e.g. 'Agustus' or 8) [default: busiest month]"
        )]
        month: Option<String>,

        #[arg(short, long, default_value = "weathersit,temp,hum,windspeed")]
        columns: String,

        #[arg(long)]
        strict: bool,
    },

    /// Check the dataset for data-quality problems
    Validate {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
