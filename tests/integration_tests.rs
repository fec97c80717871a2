use std::path::PathBuf;

use vehicles_dashboard::dashboard::{Dashboard, DashboardParams};
use vehicles_dashboard::error::PipelineError;
use vehicles_dashboard::listing::Listing;
use vehicles_dashboard::loader::{load_listings, read_listings};
use vehicles_dashboard::pipeline::{
    ConditionVocabulary, count_by_brand_condition, derive_brand, filter_by_brand,
    order_by_condition,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vehicles_sample.csv")
}

#[test]
fn test_full_pipeline() {
    let listings = load_listings(fixture()).expect("Failed to load fixture");
    assert_eq!(listings.len(), 14);

    let dash = Dashboard::build(
        &listings,
        &DashboardParams::default(),
        &ConditionVocabulary::default(),
    )
    .unwrap();

    // First brand after ordering by condition is the first "new" listing.
    assert_eq!(dash.selected_brand.as_deref(), Some("chevrolet"));
    assert_eq!(dash.listings.len(), 2);
    assert_eq!(dash.brands[0].brand, "ford");
    assert_eq!(dash.brands[0].count, 3);

    let total: usize = dash.brand_condition_counts.iter().map(|c| c.count).sum();
    assert_eq!(total, 14);
    assert_eq!(dash.brand_condition_counts.len(), 12);

    assert_eq!(dash.year_condition_histogram.total, 13);
    assert_eq!(dash.year_condition_histogram.skipped, 1);
    assert_eq!(dash.odometer_scatter.len(), 12);
    assert!(dash.warnings.is_empty());
}

#[test]
fn test_two_brand_comparison_on_fixture() {
    let listings = load_listings(fixture()).unwrap();
    let params = DashboardParams {
        brand1: Some("ford".into()),
        brand2: Some("hyundai".into()),
        normalize: true,
        ..Default::default()
    };
    let dash = Dashboard::build(&listings, &params, &ConditionVocabulary::default()).unwrap();

    let ford: Vec<_> = dash
        .comparison
        .first
        .points
        .iter()
        .map(|p| (p.condition.as_str(), p.price))
        .collect();
    let hyundai: Vec<_> = dash
        .comparison
        .second
        .points
        .iter()
        .map(|p| (p.condition.as_str(), p.price))
        .collect();

    assert_eq!(ford, vec![("good", 15850.0), ("fair", 1500.0)]);
    assert_eq!(hyundai, vec![("like new", 5500.0), ("excellent", 16500.0)]);

    let mass: f64 = dash
        .year_condition_histogram
        .buckets
        .iter()
        .map(|b| b.value)
        .sum();
    assert!((mass - 1.0).abs() < 1e-9);
}

#[test]
fn test_inspect_brand_rows_follow_condition_order() {
    let listings = load_listings(fixture()).unwrap();
    let vocab = ConditionVocabulary::default();
    let rows = order_by_condition(derive_brand(&listings).unwrap(), &vocab);

    let ford = filter_by_brand(&rows, "ford");
    let seen: Vec<_> = ford.iter().map(|r| (r.condition.as_str(), r.price)).collect();
    assert_eq!(seen, vec![("good", 25500.0), ("good", 6200.0), ("fair", 1500.0)]);
    assert!(ford.iter().all(|r| r.brand_count == 3));

    assert!(filter_by_brand(&rows, "tesla").is_empty());
    assert_eq!(
        count_by_brand_condition(&ford, &vocab)
            .iter()
            .map(|c| c.count)
            .sum::<usize>(),
        ford.len()
    );
}

#[test]
fn test_three_listing_scenario() {
    let data = "model,condition,price,model_year,odometer\n\
                Ford F150,good,10000,2015,50000\n\
                Ford F150,new,20000,2020,1000\n\
                Toyota Camry,good,12000,2018,30000\n";
    let listings = read_listings(data.as_bytes()).unwrap();
    let rows = derive_brand(&listings).unwrap();

    let brands: Vec<_> = rows.iter().map(|r| r.brand.as_str()).collect();
    assert_eq!(brands, vec!["Ford", "Ford", "Toyota"]);

    let toyota = filter_by_brand(&rows, "Toyota");
    assert_eq!(toyota, vec![rows[2].clone()]);
}

#[test]
fn test_blank_model_aborts_the_run() {
    let data = "model,condition,price,model_year,odometer\n\
                ford focus,good,4000,2010,90000\n\
                ,good,5000,2011,80000\n";
    let err = read_listings(data.as_bytes()).unwrap_err();
    assert!(matches!(err, PipelineError::MalformedRow { row: 2, .. }));

    let listings = vec![
        Listing::new("ford focus", "good", 4000.0),
        Listing::new("", "good", 5000.0),
    ];
    let err = Dashboard::build(
        &listings,
        &DashboardParams::default(),
        &ConditionVocabulary::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::MalformedRow { row: 2, .. }));
}

#[test]
fn test_missing_condition_column_aborts_the_run() {
    let data = "model,price,model_year,odometer\n\
                ford f150,100,2015,1\n\
                toyota camry,200,2016,2\n";
    let err = read_listings(data.as_bytes()).unwrap_err();

    match err {
        PipelineError::MalformedRow { field, .. } => assert_eq!(field, "condition"),
        other => panic!("unexpected error: {other}"),
    }
}
