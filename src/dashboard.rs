//! Assembles every dashboard view for one set of parameters.
//!
//! [`Dashboard::build`] is the equivalent of one interaction: it runs the whole
//! pipeline against the listings table with the parameters it is handed and
//! returns the views. Nothing is kept between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{EmptyResultWarning, PipelineError};
use crate::listing::{Listing, VehicleRow};
use crate::pipeline::types::{
    BrandComparison, BrandConditionCount, BrandConditionPrice, BrandCount, ScatterPoint,
    YearConditionHistogram,
};
use crate::pipeline::{
    ConditionVocabulary, brand_counts, brand_list, compare_brands, count_by_brand_condition,
    derive_brand, filter_by_brand, mean_price_by_brand_condition, odometer_by_year,
    order_by_condition, rank_brands_by_total, year_condition_histogram,
};

/// User-chosen parameters. Brands left unset default to the first brand of
/// the condition-ordered table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardParams {
    pub selected_brand: Option<String>,
    pub brand1: Option<String>,
    pub brand2: Option<String>,
    pub normalize: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub total_rows: usize,
    pub brands: Vec<BrandCount>,
    pub selected_brand: Option<String>,
    pub listings: Vec<VehicleRow>,
    pub brand_condition_counts: Vec<BrandConditionCount>,
    pub count_order: Vec<String>,
    pub brand_condition_prices: Vec<BrandConditionPrice>,
    pub price_order: Vec<String>,
    pub year_condition_histogram: YearConditionHistogram,
    pub comparison: BrandComparison,
    pub odometer_scatter: Vec<ScatterPoint>,
    pub warnings: Vec<EmptyResultWarning>,
}

impl Dashboard {
    /// Runs the pipeline over `listings`.
    ///
    /// # Errors
    ///
    /// Fails only when a listing is malformed (blank model or condition). Empty views are
    /// reported in `warnings` instead.
    #[tracing::instrument(skip(listings, vocabulary), fields(rows = listings.len()))]
    pub fn build(
        listings: &[Listing],
        params: &DashboardParams,
        vocabulary: &ConditionVocabulary,
    ) -> Result<Self, PipelineError> {
        let rows = order_by_condition(derive_brand(listings)?, vocabulary);

        let brand_names = brand_list(&rows);
        let default_brand = brand_names.first().cloned();
        let pick = |choice: &Option<String>| choice.clone().or_else(|| default_brand.clone());

        let selected_brand = pick(&params.selected_brand);
        let brand1 = pick(&params.brand1);
        let brand2 = pick(&params.brand2);
        debug!(?selected_brand, ?brand1, ?brand2, normalize = params.normalize, "Parameters resolved");

        let selected_rows = selected_brand
            .as_deref()
            .map(|b| filter_by_brand(&rows, b))
            .unwrap_or_default();

        let brand_condition_counts = count_by_brand_condition(&rows, vocabulary);
        let count_order = rank_brands_by_total(
            brand_condition_counts
                .iter()
                .map(|c| (c.brand.as_str(), c.count as f64)),
        );

        let brand_condition_prices = mean_price_by_brand_condition(&rows, vocabulary);
        let price_order = rank_brands_by_total(
            brand_condition_prices
                .iter()
                .map(|p| (p.brand.as_str(), p.price)),
        );

        let year_condition_histogram = year_condition_histogram(&rows, vocabulary, params.normalize);

        let comparison = compare_brands(
            &rows,
            brand1.as_deref().unwrap_or_default(),
            brand2.as_deref().unwrap_or_default(),
            vocabulary,
        );

        let odometer_scatter = odometer_by_year(&rows);

        let mut warnings = Vec::new();
        let mut check = |empty: bool, view: &str, brand: Option<&String>| {
            if empty {
                warnings.push(EmptyResultWarning {
                    view: view.to_string(),
                    brand: brand.cloned(),
                });
            }
        };
        check(selected_rows.is_empty(), "listings", selected_brand.as_ref());
        check(brand_condition_counts.is_empty(), "brand_condition_counts", None);
        check(brand_condition_prices.is_empty(), "brand_condition_prices", None);
        check(
            year_condition_histogram.buckets.is_empty(),
            "year_condition_histogram",
            None,
        );
        check(comparison.first.points.is_empty(), "comparison.first", brand1.as_ref());
        check(comparison.second.points.is_empty(), "comparison.second", brand2.as_ref());
        check(odometer_scatter.is_empty(), "odometer_scatter", None);

        for w in &warnings {
            warn!(view = %w.view, brand = ?w.brand, "Empty result");
        }

        info!(
            brands = brand_names.len(),
            selected = selected_brand.as_deref().unwrap_or(""),
            listings = selected_rows.len(),
            warnings = warnings.len(),
            "Dashboard built"
        );

        Ok(Dashboard {
            generated_at: Utc::now(),
            total_rows: rows.len(),
            brands: brand_counts(&rows),
            selected_brand,
            listings: selected_rows,
            brand_condition_counts,
            count_order,
            brand_condition_prices,
            price_order,
            year_condition_histogram,
            comparison,
            odometer_scatter,
            warnings,
        })
    }
}
