use crate::listing::VehicleRow;
use crate::pipeline::aggregate::count_by;
use crate::pipeline::condition::ConditionVocabulary;
use crate::pipeline::types::{YearConditionBucket, YearConditionHistogram};

/// Counts vehicles per (model_year, condition), ordered by year then condition rank.
///
/// With `normalize`, each bucket's value is its count divided by the total over
/// *all* buckets, so the values of the whole histogram sum to 1.0. This is not
/// a per-condition normalization. Rows without a model year fall outside every
/// bucket and are reported in `skipped`.
pub fn year_condition_histogram(
    rows: &[VehicleRow],
    vocabulary: &ConditionVocabulary,
    normalize: bool,
) -> YearConditionHistogram {
    let counts = count_by(rows, |row| {
        row.model_year
            .map(|year| (year, vocabulary.key(&row.condition)))
    });

    let total: usize = counts.values().sum();
    let skipped = rows.len() - total;

    let buckets = counts
        .into_iter()
        .map(|((model_year, condition), count)| {
            let value = if normalize {
                count as f64 / total as f64
            } else {
                count as f64
            };
            YearConditionBucket {
                model_year,
                condition: condition.into_label(),
                count,
                value,
            }
        })
        .collect();

    YearConditionHistogram {
        normalized: normalize,
        total,
        skipped,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;
    use crate::pipeline::brand::derive_brand;

    fn rows() -> Vec<VehicleRow> {
        derive_brand(&[
            Listing::new("ford f-150", "good", 1.0).with_model_year(2015),
            Listing::new("ford focus", "good", 1.0).with_model_year(2015),
            Listing::new("ford escape", "new", 1.0).with_model_year(2015),
            Listing::new("toyota camry", "good", 1.0).with_model_year(2018),
            Listing::new("toyota tacoma", "fair", 1.0).with_model_year(2003),
            Listing::new("toyota corolla", "fair", 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_raw_buckets_sum_to_row_count() {
        let hist = year_condition_histogram(&rows(), &ConditionVocabulary::default(), false);

        assert!(!hist.normalized);
        assert_eq!(hist.total, 5);
        assert_eq!(hist.skipped, 1);
        assert_eq!(hist.buckets.iter().map(|b| b.value).sum::<f64>(), 5.0);
    }

    #[test]
    fn test_bucket_order() {
        let hist = year_condition_histogram(&rows(), &ConditionVocabulary::default(), false);
        let keys: Vec<_> = hist
            .buckets
            .iter()
            .map(|b| (b.model_year, b.condition.as_str(), b.count))
            .collect();

        assert_eq!(
            keys,
            vec![
                (2003, "fair", 1),
                (2015, "new", 1),
                (2015, "good", 2),
                (2018, "good", 1),
            ]
        );
    }

    #[test]
    fn test_normalization_is_global() {
        let hist = year_condition_histogram(&rows(), &ConditionVocabulary::default(), true);

        let sum: f64 = hist.buckets.iter().map(|b| b.value).sum();
        assert!((sum - 1.0).abs() < 1e-9);

        // Each "good" bucket is a share of all five rows, not of the three "good" rows.
        let good_2015 = hist
            .buckets
            .iter()
            .find(|b| b.model_year == 2015 && b.condition == "good")
            .unwrap();
        assert!((good_2015.value - 0.4).abs() < 1e-9);
        assert_eq!(good_2015.count, 2);
    }

    #[test]
    fn test_empty_histogram_has_no_buckets() {
        let hist = year_condition_histogram(&[], &ConditionVocabulary::default(), true);
        assert!(hist.buckets.is_empty());
        assert_eq!(hist.total, 0);
    }
}
