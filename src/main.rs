//! CLI entry point for the vehicles dashboard.
//!
//! Each invocation is one dashboard interaction: the listings CSV is loaded,
//! the pipeline runs once with the parameters given on the command line, and
//! the resulting views are written as JSON or CSV for a rendering layer.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vehicles_dashboard::{
    dashboard::{Dashboard, DashboardParams},
    loader::load_listings,
    output::{export_dashboard, print_pretty, print_summary, write_csv, write_json},
    pipeline::{ConditionVocabulary, brand_counts, derive_brand, filter_by_brand, order_by_condition},
};

#[derive(Parser)]
#[command(name = "vehicles_dashboard")]
#[command(about = "Aggregate views over a vehicle listings CSV", long_about = None)]
struct Cli {
    /// Listings CSV to load
    #[arg(short, long, global = true, env = "VEHICLES_CSV", default_value = "vehicles_us.csv")]
    input: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewParams {
    /// Brand whose listings are shown (defaults to the first brand)
    #[arg(short, long)]
    brand: Option<String>,

    /// First brand of the price comparison
    #[arg(long)]
    brand1: Option<String>,

    /// Second brand of the price comparison
    #[arg(long)]
    brand2: Option<String>,

    /// Normalize the model year histogram so all buckets sum to 1
    #[arg(short, long, default_value_t = false)]
    normalize: bool,
}

impl From<ViewParams> for DashboardParams {
    fn from(p: ViewParams) -> Self {
        DashboardParams {
            selected_brand: p.brand,
            brand1: p.brand1,
            brand2: p.brand2,
            normalize: p.normalize,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List brands with their listing counts
    Brands,
    /// Write the listings of one brand as CSV
    Inspect {
        /// Brand to filter on
        #[arg(short, long)]
        brand: String,

        /// CSV file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build every view and write the dashboard as JSON
    Dashboard {
        #[command(flatten)]
        params: ViewParams,

        /// JSON file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build every view and write one CSV per view into a directory
    Export {
        #[command(flatten)]
        params: ViewParams,

        /// Directory to write the views into
        #[arg(short = 'd', long, default_value = "dashboard")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/vehicles_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vehicles_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let vocabulary = ConditionVocabulary::default();
    let listings = load_listings(&cli.input)?;

    match cli.command {
        Commands::Brands => {
            let rows = order_by_condition(derive_brand(&listings)?, &vocabulary);
            let counts = brand_counts(&rows);

            for c in &counts {
                info!(brand = %c.brand, count = c.count, "Brand");
            }
            info!(brands = counts.len(), rows = rows.len(), "Brand list summary");
        }
        Commands::Inspect { brand, output } => {
            let rows = order_by_condition(derive_brand(&listings)?, &vocabulary);
            let selected = filter_by_brand(&rows, &brand);

            if selected.is_empty() {
                tracing::warn!(brand = %brand, "No listings for brand");
            }
            write_csv(output.as_deref(), &selected)?;
            info!(brand = %brand, rows = selected.len(), "Listings written");
        }
        Commands::Dashboard { params, output } => {
            let dashboard = Dashboard::build(&listings, &params.into(), &vocabulary)?;

            print_pretty(&dashboard);
            print_summary(&dashboard);
            write_json(output.as_deref(), &dashboard)?;
        }
        Commands::Export { params, out_dir } => {
            let dashboard = Dashboard::build(&listings, &params.into(), &vocabulary)?;

            print_summary(&dashboard);
            export_dashboard(&out_dir, &dashboard)?;
        }
    }

    Ok(())
}
