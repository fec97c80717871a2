//! The aggregation pipeline behind the dashboard.
//!
//! Every function here is pure: it takes the listings table (and the
//! parameters picked by the caller) and returns a freshly derived table. Nothing
//! is cached between calls; the dashboard re-runs the whole pipeline for each
//! interaction.

pub mod aggregate;
pub mod brand;
pub mod compare;
pub mod condition;
pub mod histogram;
pub mod scatter;
pub mod types;

pub use aggregate::{
    Measure, count_by, count_by_brand_condition, mean_by, mean_price_by_brand,
    mean_price_by_brand_condition, mean_price_by_condition, rank_brands_by_total,
};
pub use brand::{brand_counts, brand_list, brand_of, derive_brand, filter_by_brand};
pub use compare::compare_brands;
pub use condition::{CONDITION_ORDER, ConditionKey, ConditionVocabulary, order_by_condition};
pub use histogram::year_condition_histogram;
pub use scatter::odometer_by_year;
