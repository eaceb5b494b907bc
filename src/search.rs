//! Market search URL builder.
//!
//! Maps a reference listing plus tolerance windows to the marketplace's
//! search URL. Pure: no network access, same input, same URL.

use serde::{Deserialize, Serialize};

use crate::brands;
use crate::listing::{Body, Condition, Fuel, Gearbox, ListingRecord, YEAR_RANGE};

/// Lowest year the marketplace's year filter accepts
const YEAR_FLOOR: u32 = 2000;
/// Lowest power the marketplace's power filter accepts
const POWER_FLOOR: u32 = 50;

/// Caller-supplied search and comparison windows.
///
/// An unset window is written as `"off"` so it survives a config round trip
/// instead of falling back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Year window (±)
    #[serde(with = "window")]
    pub years: Option<u32>,
    /// Mileage window in km (±)
    #[serde(with = "window")]
    pub km: Option<u32>,
    /// Power window in hp (±)
    #[serde(with = "window")]
    pub power: Option<u32>,
    /// Engine size band lower bound in cc
    #[serde(with = "window")]
    pub engine_min: Option<u32>,
    /// Engine size band upper bound in cc
    #[serde(with = "window")]
    pub engine_max: Option<u32>,
    /// Accepted fuels, in the order they are encoded
    pub fuels: Vec<Fuel>,
    /// Accepted gearboxes, in the order they are encoded
    pub gearboxes: Vec<Gearbox>,
    /// Accepted conditions, in the order they are encoded
    pub conditions: Vec<Condition>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            years: Some(2),
            km: Some(30_000),
            power: Some(20),
            engine_min: Some(1500),
            engine_max: Some(2500),
            fuels: vec![Fuel::Diesel],
            gearboxes: vec![Gearbox::Automatic],
            conditions: vec![Condition::Used],
        }
    }
}

impl ToleranceConfig {
    /// No windows and no accepted sets: only the mandatory filters are emitted
    pub fn unset() -> Self {
        Self {
            years: None,
            km: None,
            power: None,
            engine_min: None,
            engine_max: None,
            fuels: Vec::new(),
            gearboxes: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

/// `Option<u32>` as a number, or the string `"off"` for `None`
mod window {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const OFF: &str = "off";

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(width) => serializer.serialize_u32(*width),
            None => serializer.serialize_str(OFF),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Width(u32),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Width(width) => Ok(Some(width)),
            Raw::Text(text) if text.trim().eq_ignore_ascii_case(OFF) => Ok(None),
            Raw::Text(text) => Err(de::Error::custom(format!(
                "expected a number or \"{}\", got \"{}\"",
                OFF, text
            ))),
        }
    }
}

/// Parse a window given on the command line: a width, or `off`
pub fn parse_window(text: &str) -> Result<Option<u32>, String> {
    if text.trim().eq_ignore_ascii_case(window::OFF) {
        return Ok(None);
    }
    text.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| format!("expected a number or \"{}\": {}", window::OFF, e))
}

/// Marketplace location of the car search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSite {
    pub base_url: String,
    pub category_path: String,
}

impl Default for SearchSite {
    fn default() -> Self {
        Self {
            base_url: "https://www.olx.ro".to_string(),
            category_path: "auto-masini-moto-ambarcatiuni/autoturisme".to_string(),
        }
    }
}

/// Percent-encoded `key=value` pairs in insertion order
#[derive(Default)]
struct Query {
    pairs: Vec<String>,
}

impl Query {
    fn push(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        self.pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&value)
        ));
    }

    fn push_range(&mut self, filter: &str, from: u32, to: u32) {
        self.push(&format!("search[{}:from]", filter), from);
        self.push(&format!("search[{}:to]", filter), to);
    }

    fn push_indexed<'a>(&mut self, filter: &str, values: impl IntoIterator<Item = &'a str>) {
        for (i, value) in values.into_iter().enumerate() {
            self.push(&format!("search[{}][{}]", filter, i), value);
        }
    }

    fn finish(self) -> String {
        self.pairs.join("&")
    }
}

/// Search URL on the default marketplace
pub fn build_search_url(record: &ListingRecord, tolerances: &ToleranceConfig) -> String {
    build_search_url_for(&SearchSite::default(), record, tolerances)
}

/// Search URL for listings similar to `record` on `site`
pub fn build_search_url_for(
    site: &SearchSite,
    record: &ListingRecord,
    tolerances: &ToleranceConfig,
) -> String {
    let mut url = format!(
        "{}/{}/",
        site.base_url.trim_end_matches('/'),
        site.category_path.trim_matches('/')
    );
    if record.has_brand() {
        url.push_str(&brands::slug_for(&record.brand));
        url.push('/');
    }

    let mut query = Query::default();
    query.push("currency", "EUR");
    query.push("search[private_business]", "private");

    if record.has_model() {
        let model_slug = record.model.trim().to_lowercase().replace(' ', "-");
        query.push_indexed("filter_enum_model", [model_slug.as_str()]);
    }

    if let Some(window) = tolerances.years.filter(|_| record.year > 0) {
        let from = record.year.saturating_sub(window).max(YEAR_FLOOR);
        let to = record.year.saturating_add(window).min(*YEAR_RANGE.end());
        query.push_range("filter_float_year", from, to);
    }

    if let Some(window) = tolerances.km.filter(|_| record.mileage_km > 0) {
        let km = record.mileage_km;
        query.push_range("filter_float_rulaj_pana", km.saturating_sub(window), km.saturating_add(window));
    }

    if let (Some(power), Some(window)) = (record.power_hp, tolerances.power) {
        let from = power.saturating_sub(window).max(POWER_FLOOR);
        query.push_range("filter_float_engine_power", from, power.saturating_add(window));
    }

    if let (Some(min), Some(max)) = (tolerances.engine_min, tolerances.engine_max) {
        query.push_range("filter_float_enginesize", min, max);
    }

    query.push_indexed("filter_enum_petrol", tolerances.fuels.iter().map(Fuel::as_str));

    if !matches!(record.body, Body::Unknown | Body::Other(_)) {
        query.push_indexed("filter_enum_car_body", [record.body.as_str()]);
    }

    query.push_indexed("filter_enum_gearbox", tolerances.gearboxes.iter().map(Gearbox::as_str));
    query.push_indexed("filter_enum_state", tolerances.conditions.iter().map(Condition::as_str));

    format!("{}?{}", url, query.finish())
}
