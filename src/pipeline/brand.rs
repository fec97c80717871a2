//! Brand derivation and brand-level filtering.

use std::collections::HashMap;

use crate::error::PipelineError;
use crate::listing::{Listing, VehicleRow};
use crate::pipeline::types::BrandCount;

/// Returns the manufacturer token of a model string, or `None` for a blank model.
pub fn brand_of(model: &str) -> Option<&str> {
    model.split_whitespace().next()
}

/// Adds `brand` and `brand_count` to every listing, keeping row order.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedRow`] for the first listing whose model or
/// condition is empty or blank; no row is dropped silently.
pub fn derive_brand(listings: &[Listing]) -> Result<Vec<VehicleRow>, PipelineError> {
    let brands = listings
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let row = i as u64 + 1;
            l.validate(row)?;
            brand_of(&l.model).ok_or_else(|| PipelineError::malformed(row, "model", "model is empty"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for brand in &brands {
        *counts.entry(*brand).or_default() += 1;
    }

    Ok(listings
        .iter()
        .zip(&brands)
        .map(|(listing, brand)| VehicleRow::from_listing(listing, brand, counts[brand]))
        .collect())
}

/// Rows whose brand equals `brand`. An unknown brand yields an empty table.
pub fn filter_by_brand(rows: &[VehicleRow], brand: &str) -> Vec<VehicleRow> {
    rows.iter().filter(|r| r.brand == brand).cloned().collect()
}

/// Distinct brands in order of first appearance.
pub fn brand_list(rows: &[VehicleRow]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.brand.as_str()))
        .map(|r| r.brand.clone())
        .collect()
}

/// Row count per brand, largest first. Ties keep first-appearance order.
pub fn brand_counts(rows: &[VehicleRow]) -> Vec<BrandCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.brand.as_str()).or_default() += 1;
    }

    let mut out: Vec<BrandCount> = brand_list(rows)
        .into_iter()
        .map(|brand| BrandCount {
            count: counts[brand.as_str()],
            brand,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Listing> {
        vec![
            Listing::new("Ford F150", "good", 10000.0)
                .with_model_year(2015)
                .with_odometer(50000.0),
            Listing::new("Ford F150", "new", 20000.0)
                .with_model_year(2020)
                .with_odometer(1000.0),
            Listing::new("Toyota Camry", "good", 12000.0)
                .with_model_year(2018)
                .with_odometer(30000.0),
        ]
    }

    #[test]
    fn test_brand_of_first_token() {
        assert_eq!(brand_of("chevrolet silverado 1500"), Some("chevrolet"));
        assert_eq!(brand_of("  ram   2500"), Some("ram"));
        assert_eq!(brand_of("   "), None);
        assert_eq!(brand_of(""), None);
    }

    #[test]
    fn test_brand_of_is_idempotent() {
        for model in ["ford f-150", "jeep grand cherokee laredo", "bmw"] {
            let brand = brand_of(model).unwrap();
            assert_eq!(brand_of(brand), Some(brand));
        }
    }

    #[test]
    fn test_derive_brand_scenario() {
        let rows = derive_brand(&scenario()).unwrap();

        let brands: Vec<_> = rows.iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(brands, vec!["Ford", "Ford", "Toyota"]);

        let counts: Vec<_> = rows.iter().map(|r| r.brand_count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn test_derive_brand_rejects_empty_model() {
        let mut listings = scenario();
        listings.push(Listing::new(" ", "good", 1.0));

        let err = derive_brand(&listings).unwrap_err();
        match err {
            PipelineError::MalformedRow { row, field, .. } => {
                assert_eq!(row, 4);
                assert_eq!(field, "model");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_derive_brand_rejects_blank_condition() {
        let mut listings = scenario();
        listings.insert(1, Listing::new("Honda Civic", "", 1.0));

        let err = derive_brand(&listings).unwrap_err();
        match err {
            PipelineError::MalformedRow { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "condition");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_by_brand() {
        let rows = derive_brand(&scenario()).unwrap();

        let toyota = filter_by_brand(&rows, "Toyota");
        assert_eq!(toyota.len(), 1);
        assert_eq!(toyota[0], rows[2]);

        assert!(filter_by_brand(&rows, "Tesla").is_empty());
    }

    #[test]
    fn test_brand_list_first_appearance() {
        let rows = derive_brand(&[
            Listing::new("toyota camry", "good", 1.0),
            Listing::new("ford focus", "good", 1.0),
            Listing::new("toyota rav4", "good", 1.0),
        ])
        .unwrap();

        assert_eq!(brand_list(&rows), vec!["toyota", "ford"]);
    }

    #[test]
    fn test_brand_counts_descending_with_stable_ties() {
        let rows = derive_brand(&[
            Listing::new("bmw x5", "good", 1.0),
            Listing::new("ford focus", "good", 1.0),
            Listing::new("kia soul", "good", 1.0),
            Listing::new("ford f-150", "good", 1.0),
        ])
        .unwrap();

        let counts = brand_counts(&rows);
        let pairs: Vec<_> = counts.iter().map(|c| (c.brand.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("ford", 2), ("bmw", 1), ("kia", 1)]);
    }
}
