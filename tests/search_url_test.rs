//! Market search URL tests

use carscout::extract::extract;
use carscout::listing::{Body, Condition, Fuel, Gearbox, ListingRecord};
use carscout::search::{build_search_url, build_search_url_for, SearchSite, ToleranceConfig};

fn reference() -> ListingRecord {
    ListingRecord {
        brand: "BMW".into(),
        model: "X5".into(),
        year: 2018,
        mileage_km: 100_000,
        power_hp: Some(265),
        ..ListingRecord::unknown("https://www.olx.ro/d/oferta/bmw-x5-IDa1.html")
    }
}

/// Decoded `key=value` pairs of a search URL, in order
fn query_pairs(url: &str) -> Vec<(String, String)> {
    url::Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[test]
fn test_reference_with_default_tolerances() {
    let url = build_search_url(&reference(), &ToleranceConfig::default());
    assert!(url.starts_with("https://www.olx.ro/auto-masini-moto-ambarcatiuni/autoturisme/bmw/?"));

    let pairs = query_pairs(&url);
    assert_eq!(value(&pairs, "currency"), Some("EUR"));
    assert_eq!(value(&pairs, "search[private_business]"), Some("private"));
    assert_eq!(value(&pairs, "search[filter_enum_model][0]"), Some("x5"));
    assert_eq!(value(&pairs, "search[filter_float_year:from]"), Some("2016"));
    assert_eq!(value(&pairs, "search[filter_float_year:to]"), Some("2020"));
    assert_eq!(value(&pairs, "search[filter_float_rulaj_pana:from]"), Some("70000"));
    assert_eq!(value(&pairs, "search[filter_float_rulaj_pana:to]"), Some("130000"));
    assert_eq!(value(&pairs, "search[filter_float_engine_power:from]"), Some("245"));
    assert_eq!(value(&pairs, "search[filter_float_engine_power:to]"), Some("285"));
    assert_eq!(value(&pairs, "search[filter_float_enginesize:from]"), Some("1500"));
    assert_eq!(value(&pairs, "search[filter_float_enginesize:to]"), Some("2500"));
    assert_eq!(value(&pairs, "search[filter_enum_petrol][0]"), Some("diesel"));
    assert_eq!(value(&pairs, "search[filter_enum_gearbox][0]"), Some("automatic"));
    assert_eq!(value(&pairs, "search[filter_enum_state][0]"), Some("used"));
    assert_eq!(value(&pairs, "search[filter_enum_car_body][0]"), None);
}

#[test]
fn test_year_window_is_clamped() {
    let tolerances = ToleranceConfig { years: Some(3), ..ToleranceConfig::unset() };

    let new = ListingRecord { year: 2024, ..reference() };
    let pairs = query_pairs(&build_search_url(&new, &tolerances));
    assert_eq!(value(&pairs, "search[filter_float_year:from]"), Some("2021"));
    assert_eq!(value(&pairs, "search[filter_float_year:to]"), Some("2025"));

    let old = ListingRecord { year: 2001, ..reference() };
    let pairs = query_pairs(&build_search_url(&old, &tolerances));
    assert_eq!(value(&pairs, "search[filter_float_year:from]"), Some("2000"));
    assert_eq!(value(&pairs, "search[filter_float_year:to]"), Some("2004"));
}

#[test]
fn test_lower_bounds_never_go_negative() {
    let record = ListingRecord { mileage_km: 10_000, power_hp: Some(60), ..reference() };
    let pairs = query_pairs(&build_search_url(&record, &ToleranceConfig::default()));
    assert_eq!(value(&pairs, "search[filter_float_rulaj_pana:from]"), Some("0"));
    assert_eq!(value(&pairs, "search[filter_float_rulaj_pana:to]"), Some("40000"));
    assert_eq!(value(&pairs, "search[filter_float_engine_power:from]"), Some("50"));
    assert_eq!(value(&pairs, "search[filter_float_engine_power:to]"), Some("80"));
}

#[test]
fn test_zero_width_window() {
    let tolerances = ToleranceConfig { years: Some(0), ..ToleranceConfig::unset() };
    let pairs = query_pairs(&build_search_url(&reference(), &tolerances));
    assert_eq!(value(&pairs, "search[filter_float_year:from]"), Some("2018"));
    assert_eq!(value(&pairs, "search[filter_float_year:to]"), Some("2018"));
}

#[test]
fn test_engine_band_needs_both_bounds() {
    let tolerances = ToleranceConfig { engine_min: Some(1500), ..ToleranceConfig::unset() };
    let url = build_search_url(&reference(), &tolerances);
    assert!(!url.contains("enginesize"));
}

#[test]
fn test_sentinel_record_gets_mandatory_filters_only() {
    let record = ListingRecord::unknown("https://www.olx.ro/d/oferta/x.html");
    let url = build_search_url(&record, &ToleranceConfig::unset());
    assert_eq!(
        url,
        "https://www.olx.ro/auto-masini-moto-ambarcatiuni/autoturisme/?currency=EUR\
         &search%5Bprivate_business%5D=private"
    );
}

#[test]
fn test_multi_valued_sets_are_indexed_in_order() {
    let tolerances = ToleranceConfig {
        fuels: vec![Fuel::Hybrid, Fuel::Petrol],
        gearboxes: vec![Gearbox::Manual, Gearbox::Automatic],
        conditions: vec![Condition::New, Condition::Used],
        ..ToleranceConfig::unset()
    };
    let pairs = query_pairs(&build_search_url(&reference(), &tolerances));
    assert_eq!(value(&pairs, "search[filter_enum_petrol][0]"), Some("hybrid"));
    assert_eq!(value(&pairs, "search[filter_enum_petrol][1]"), Some("petrol"));
    assert_eq!(value(&pairs, "search[filter_enum_gearbox][0]"), Some("manual"));
    assert_eq!(value(&pairs, "search[filter_enum_gearbox][1]"), Some("automatic"));
    assert_eq!(value(&pairs, "search[filter_enum_state][0]"), Some("new"));
    assert_eq!(value(&pairs, "search[filter_enum_state][1]"), Some("used"));
}

#[test]
fn test_known_body_is_filtered() {
    let record = ListingRecord { body: Body::EstateCar, ..reference() };
    let pairs = query_pairs(&build_search_url(&record, &ToleranceConfig::unset()));
    assert_eq!(value(&pairs, "search[filter_enum_car_body][0]"), Some("estate-car"));

    let other = ListingRecord { body: Body::Other("cabrio".into()), ..reference() };
    let url = build_search_url(&other, &ToleranceConfig::unset());
    assert!(!url.contains("car_body"));
}

#[test]
fn test_same_input_same_url() {
    let a = build_search_url(&reference(), &ToleranceConfig::default());
    let b = build_search_url(&reference(), &ToleranceConfig::default());
    assert_eq!(a, b);
}

#[test]
fn test_search_from_extracted_listing() {
    let html = r#"<html><body><div data-testid="ad-parameters-container">
        <p>An de fabricatie: 2019</p>
        <p>Rulaj: 95 000 km</p>
        <p>Putere: 150 CP</p>
        <p>Caroserie: Hatchback</p>
    </div></body></html>"#;
    let record = extract(html, "https://www.olx.ro/d/oferta/volkswagen-golf-8-IDc3.html").unwrap();
    let url = build_search_url(&record, &ToleranceConfig::default());

    assert!(url.contains("/autoturisme/volkswagen/?"));
    let pairs = query_pairs(&url);
    assert_eq!(value(&pairs, "search[filter_enum_model][0]"), Some("golf"));
    assert_eq!(value(&pairs, "search[filter_float_year:from]"), Some("2017"));
    assert_eq!(value(&pairs, "search[filter_float_rulaj_pana:to]"), Some("125000"));
    assert_eq!(value(&pairs, "search[filter_float_engine_power:from]"), Some("130"));
    assert_eq!(value(&pairs, "search[filter_enum_car_body][0]"), Some("hatchback"));
}

#[test]
fn test_custom_site() {
    let site = SearchSite {
        base_url: "https://www.olx.ro".into(),
        category_path: "auto-masini-moto-ambarcatiuni/autoturisme-electrice".into(),
    };
    let url = build_search_url_for(&site, &reference(), &ToleranceConfig::unset());
    assert!(url.starts_with("https://www.olx.ro/auto-masini-moto-ambarcatiuni/autoturisme-electrice/bmw/?"));
}
