use crate::listing::VehicleRow;
use crate::pipeline::condition::{ConditionKey, ConditionVocabulary};
use crate::pipeline::types::{BrandConditionCount, BrandConditionPrice, BrandPrice, ConditionPrice};
use std::collections::{BTreeMap, HashMap};

/// Numeric column that [`mean_by`] averages over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Price,
    Odometer,
}

impl Measure {
    /// The measure's value for `row`; `None` when the row has no value.
    pub fn value(self, row: &VehicleRow) -> Option<f64> {
        let v = match self {
            Measure::Price => Some(row.price),
            Measure::Odometer => row.odometer,
        };
        v.filter(|v| !v.is_nan())
    }
}

/// Counts rows per group key, in key order.
///
/// Rows for which `key` returns `None` (a missing key column) are left out,
/// and groups without rows never appear.
pub fn count_by<K, F>(rows: &[VehicleRow], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&VehicleRow) -> Option<K>,
{
    let mut counts = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            *counts.entry(k).or_default() += 1;
        }
    }
    counts
}

/// Mean of `measure` per group key, in key order.
///
/// Missing measure values are ignored. A group with no usable value is
/// omitted rather than reported as NaN.
pub fn mean_by<K, F>(rows: &[VehicleRow], key: F, measure: Measure) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&VehicleRow) -> Option<K>,
{
    let mut series: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for row in rows {
        let (Some(k), Some(v)) = (key(row), measure.value(row)) else {
            continue;
        };
        series.entry(k).or_default().push(v);
    }

    series
        .into_iter()
        .filter_map(|(k, values)| mean(&values).map(|m| (k, m)))
        .collect()
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// The result is clamped to the slice's min and max, since summation rounding
/// can otherwise push it just outside them (three `0.1`s average to
/// `0.10000000000000002`). `values` must not contain NaN.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    Some(avg.clamp(min, max))
}

fn brand_condition(vocabulary: &ConditionVocabulary) -> impl Fn(&VehicleRow) -> Option<(String, ConditionKey)> + '_ {
    move |row| Some((row.brand.clone(), vocabulary.key(&row.condition)))
}

/// Listing count per (brand, condition), ordered by brand then condition rank.
pub fn count_by_brand_condition(rows: &[VehicleRow], vocabulary: &ConditionVocabulary) -> Vec<BrandConditionCount> {
    count_by(rows, brand_condition(vocabulary))
        .into_iter()
        .map(|((brand, condition), count)| BrandConditionCount {
            brand,
            condition: condition.into_label(),
            count,
        })
        .collect()
}

/// Mean price per (brand, condition), ordered by brand then condition rank.
pub fn mean_price_by_brand_condition(rows: &[VehicleRow], vocabulary: &ConditionVocabulary) -> Vec<BrandConditionPrice> {
    mean_by(rows, brand_condition(vocabulary), Measure::Price)
        .into_iter()
        .map(|((brand, condition), price)| BrandConditionPrice {
            brand,
            condition: condition.into_label(),
            price,
        })
        .collect()
}

/// Mean price per brand, ordered by brand.
pub fn mean_price_by_brand(rows: &[VehicleRow]) -> Vec<BrandPrice> {
    mean_by(rows, |row| Some(row.brand.clone()), Measure::Price)
        .into_iter()
        .map(|(brand, price)| BrandPrice { brand, price })
        .collect()
}

/// Mean price per condition, ordered by condition rank.
pub fn mean_price_by_condition(rows: &[VehicleRow], vocabulary: &ConditionVocabulary) -> Vec<ConditionPrice> {
    mean_by(rows, |row| Some(vocabulary.key(&row.condition)), Measure::Price)
        .into_iter()
        .map(|(condition, price)| ConditionPrice {
            condition: condition.into_label(),
            price,
        })
        .collect()
}

/// Orders brands by the total of their values, largest first.
///
/// This is the category order of a stacked bar chart sorted by "total
/// descending". Equal totals keep lexicographic brand order.
pub fn rank_brands_by_total<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for (brand, value) in entries {
        *totals.entry(brand).or_default() += value;
    }

    let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().map(|(brand, _)| brand.to_string()).collect()
}
