//! Output formatting and persistence for dashboard views.
//!
//! Supports debug pretty-printing, a logged summary, JSON, and CSV.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::listing::VehicleRow;
use crate::pipeline::types::{
    BrandConditionCount, BrandConditionPrice, BrandCount, ConditionPrice, ScatterPoint,
    YearConditionBucket,
};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header line of a CSV view. Written explicitly so that a view with no rows
/// still produces its columns. Must list the fields in serialization order.
pub trait CsvColumns {
    const COLUMNS: &'static [&'static str];
}

impl CsvColumns for VehicleRow {
    const COLUMNS: &'static [&'static str] = &[
        "model",
        "condition",
        "price",
        "model_year",
        "odometer",
        "brand",
        "brand_count",
    ];
}

impl CsvColumns for BrandCount {
    const COLUMNS: &'static [&'static str] = &["brand", "count"];
}

impl CsvColumns for BrandConditionCount {
    const COLUMNS: &'static [&'static str] = &["brand", "condition", "count"];
}

impl CsvColumns for BrandConditionPrice {
    const COLUMNS: &'static [&'static str] = &["brand", "condition", "price"];
}

impl CsvColumns for ConditionPrice {
    const COLUMNS: &'static [&'static str] = &["condition", "price"];
}

impl CsvColumns for YearConditionBucket {
    const COLUMNS: &'static [&'static str] = &["model_year", "condition", "count", "value"];
}

impl CsvColumns for ScatterPoint {
    const COLUMNS: &'static [&'static str] = &["model_year", "odometer", "condition"];
}

/// Logs the whole dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Logs one line per view with its row count.
pub fn print_summary(dashboard: &Dashboard) {
    info!(
        total_rows = dashboard.total_rows,
        brands = dashboard.brands.len(),
        selected_brand = dashboard.selected_brand.as_deref().unwrap_or(""),
        listings = dashboard.listings.len(),
        "Dashboard summary"
    );
    info!(
        brand_condition_counts = dashboard.brand_condition_counts.len(),
        brand_condition_prices = dashboard.brand_condition_prices.len(),
        histogram_buckets = dashboard.year_condition_histogram.buckets.len(),
        histogram_skipped = dashboard.year_condition_histogram.skipped,
        normalized = dashboard.year_condition_histogram.normalized,
        "Aggregate views"
    );
    info!(
        first = %dashboard.comparison.first.brand,
        first_points = dashboard.comparison.first.points.len(),
        second = %dashboard.comparison.second.brand,
        second_points = dashboard.comparison.second.points.len(),
        scatter_points = dashboard.odometer_scatter.len(),
        "Comparison and scatter"
    );
}

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json(path: Option<&Path>, value: &impl Serialize) -> Result<()> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Writing JSON");
            let mut file = File::create(path)?;
            serde_json::to_writer_pretty(&mut file, value)?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Writes rows as CSV with a header line, replacing any existing file.
/// The header is written even when `rows` is empty.
/// Writes to stdout when `path` is `None`.
pub fn write_csv<T: Serialize + CsvColumns>(path: Option<&Path>, rows: &[T]) -> Result<()> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), rows = rows.len(), "Writing CSV");
            serialize_rows(File::create(path)?, rows)
        }
        None => serialize_rows(std::io::stdout().lock(), rows),
    }
}

fn serialize_rows<W: Write, T: Serialize + CsvColumns>(sink: W, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn export_csv<T: Serialize + CsvColumns>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    write_csv(Some(dir.join(name).as_path()), rows)
}

/// Writes every view of `dashboard` into `dir`: one CSV per view plus the full
/// dashboard as `dashboard.json`. Returns the number of files written.
pub fn export_dashboard(dir: &Path, dashboard: &Dashboard) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    export_csv(dir, "listings.csv", &dashboard.listings)?;
    export_csv(dir, "brands.csv", &dashboard.brands)?;
    export_csv(dir, "brand_condition_counts.csv", &dashboard.brand_condition_counts)?;
    export_csv(dir, "brand_condition_prices.csv", &dashboard.brand_condition_prices)?;
    export_csv(
        dir,
        "year_condition_histogram.csv",
        &dashboard.year_condition_histogram.buckets,
    )?;
    export_csv(dir, "comparison_first.csv", &dashboard.comparison.first.points)?;
    export_csv(dir, "comparison_second.csv", &dashboard.comparison.second.points)?;
    export_csv(dir, "odometer_scatter.csv", &dashboard.odometer_scatter)?;
    write_json(Some(dir.join("dashboard.json").as_path()), dashboard)?;

    let files = 9;
    info!(dir = %dir.display(), files, "Dashboard exported");
    Ok(files)
}
