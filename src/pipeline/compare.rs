use crate::listing::VehicleRow;
use crate::pipeline::aggregate::mean_price_by_condition;
use crate::pipeline::brand::filter_by_brand;
use crate::pipeline::condition::ConditionVocabulary;
use crate::pipeline::types::{BrandComparison, BrandSeries};

/// Mean price by condition for two brands, computed independently.
///
/// The series are not aligned: a condition with no listings for one brand is
/// simply absent from that brand's series.
pub fn compare_brands(
    rows: &[VehicleRow],
    first: &str,
    second: &str,
    vocabulary: &ConditionVocabulary,
) -> BrandComparison {
    BrandComparison {
        first: brand_series(rows, first, vocabulary),
        second: brand_series(rows, second, vocabulary),
    }
}

fn brand_series(rows: &[VehicleRow], brand: &str, vocabulary: &ConditionVocabulary) -> BrandSeries {
    let filtered = filter_by_brand(rows, brand);
    BrandSeries {
        brand: brand.to_string(),
        points: mean_price_by_condition(&filtered, vocabulary),
    }
}
