//! Row types for the vehicle listings table.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PipelineError;

/// A single row deserialized from the listings CSV.
///
/// Only the columns the dashboard uses are read; any other column in the file
/// is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Listing {
    pub model: String,
    pub condition: String,
    pub price: f64,
    #[serde(default, deserialize_with = "model_year_from_float")]
    pub model_year: Option<i32>,
    #[serde(default)]
    pub odometer: Option<f64>,
}

impl Listing {
    pub fn new(model: &str, condition: &str, price: f64) -> Self {
        Listing {
            model: model.to_string(),
            condition: condition.to_string(),
            price,
            model_year: None,
            odometer: None,
        }
    }

    pub fn with_model_year(mut self, model_year: i32) -> Self {
        self.model_year = Some(model_year);
        self
    }

    pub fn with_odometer(mut self, odometer: f64) -> Self {
        self.odometer = Some(odometer);
        self
    }

    /// Rejects a listing whose `model` or `condition` is blank. `row` is the
    /// 1-based data row reported in the error.
    pub fn validate(&self, row: u64) -> Result<(), PipelineError> {
        if self.model.trim().is_empty() {
            return Err(PipelineError::malformed(row, "model", "model is empty"));
        }
        if self.condition.trim().is_empty() {
            return Err(PipelineError::malformed(row, "condition", "condition is empty"));
        }
        Ok(())
    }
}

/// A listing augmented with its derived brand and the number of rows sharing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRow {
    pub model: String,
    pub condition: String,
    pub price: f64,
    pub model_year: Option<i32>,
    pub odometer: Option<f64>,
    pub brand: String,
    pub brand_count: usize,
}

impl VehicleRow {
    pub fn from_listing(listing: &Listing, brand: &str, brand_count: usize) -> Self {
        VehicleRow {
            model: listing.model.clone(),
            condition: listing.condition.clone(),
            price: listing.price,
            model_year: listing.model_year,
            odometer: listing.odometer,
            brand: brand.to_string(),
            brand_count,
        }
    }
}

/// Model years arrive as `2011` or `2011.0` depending on how the file was exported.
fn model_year_from_float<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(year) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(D::Error::custom(format!(
            "model_year `{year}` is not a whole year"
        )));
    }

    Ok(Some(year as i32))
}
