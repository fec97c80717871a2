//! Rows of the aggregate views handed to the rendering layer.

use serde::Serialize;

/// Number of listings for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
}

/// Listing count for one (brand, condition) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandConditionCount {
    pub brand: String,
    pub condition: String,
    pub count: usize,
}

/// Mean price for one (brand, condition) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandConditionPrice {
    pub brand: String,
    pub condition: String,
    pub price: f64,
}

/// Mean price for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandPrice {
    pub brand: String,
    pub price: f64,
}

/// Mean price for one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionPrice {
    pub condition: String,
    pub price: f64,
}

/// One (model_year, condition) histogram bucket.
///
/// `value` equals `count` unless the histogram is normalized, in which case it
/// is `count` divided by the total over all buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearConditionBucket {
    pub model_year: i32,
    pub condition: String,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearConditionHistogram {
    pub normalized: bool,
    /// Sum of `count` over all buckets.
    pub total: usize,
    /// Rows left out because they have no model year.
    pub skipped: usize,
    pub buckets: Vec<YearConditionBucket>,
}

/// Mean price by condition for a single brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSeries {
    pub brand: String,
    pub points: Vec<ConditionPrice>,
}

/// Two independently computed brand series. Never aligned or zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandComparison {
    pub first: BrandSeries,
    pub second: BrandSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub model_year: i32,
    pub odometer: f64,
    pub condition: String,
}
