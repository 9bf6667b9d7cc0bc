//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use worldexplorer::{Client, DateSpec, Indicator};

#[test]
fn fetch_all_countries() {
    let cli = Client::default();
    let countries = cli.all_countries().unwrap();
    assert!(countries.len() > 200);
    assert!(countries.iter().any(|c| c.id == "DEU"));
}

#[test]
fn fetch_single_country() {
    let cli = Client::default();
    let country = cli.country("BRA").unwrap();
    assert_eq!(country.id, "BRA");
    assert_eq!(country.iso2_code, "BR");
    assert_eq!(country.capital_city, "Brasilia");
}

#[test]
fn fetch_population_range() {
    let cli = Client::default();
    let country = cli.country("DEU").unwrap();
    let pts = cli
        .indicator_series(
            &country,
            Indicator::TotalPopulation,
            &DateSpec::Range { start: 2019, end: 2020 },
        )
        .unwrap();
    assert_eq!(pts.len(), 2);
    assert!(pts[0].date <= pts[1].date);
    assert!(pts.iter().any(|p| p.value.is_some()));
}
