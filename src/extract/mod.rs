//! Extraction pipeline: one ordered fallback chain per field.
//!
//! A chain is a list of named strategies. The first strategy that returns a
//! plausible value wins and later ones are not tried. A chain that runs dry
//! leaves the field at its sentinel.

mod price;
mod slug;
mod specs;
mod title;
mod vehicle;

use std::fmt::Debug;

use tracing::{debug, info};

use crate::error::Result;
use crate::listing::{
    Body, Condition, Fuel, Gearbox, ListingRecord, UNKNOWN, UNKNOWN_TITLE,
};
use crate::page::ListingPage;

pub use price::Price;
pub use slug::listing_slug;

/// One extraction strategy: a plausible value, or nothing
pub type Strategy<T> = fn(&ListingPage) -> Option<T>;

/// A field's strategies in priority order
pub type Chain<T> = &'static [(&'static str, Strategy<T>)];

pub const TITLE_CHAIN: Chain<String> = &[
    ("meta", title::from_meta),
    ("document-title", title::from_document_title),
    ("heading", title::from_heading),
    ("json-ld", title::from_json_ld),
    ("url-slug", title::from_slug),
];

pub const PRICE_CHAIN: Chain<Price> = &[
    ("meta", price::from_meta),
    ("text", price::from_text),
];

pub const YEAR_CHAIN: Chain<u32> = &[
    ("parameters", specs::year_from_parameters),
    ("text", specs::year_from_text),
];

pub const MILEAGE_CHAIN: Chain<u32> = &[
    ("parameters", specs::mileage_from_parameters),
    ("text", specs::mileage_from_text),
];

pub const POWER_CHAIN: Chain<u32> = &[
    ("parameters", specs::power_from_parameters),
    ("text", specs::power_from_text),
];

pub const ENGINE_SIZE_CHAIN: Chain<u32> = &[
    ("parameters", specs::engine_size_from_parameters),
    ("text", specs::engine_size_from_text),
];

pub const FUEL_CHAIN: Chain<Fuel> = &[
    ("parameters", specs::fuel_from_parameters),
    ("text", specs::fuel_from_text),
];

pub const GEARBOX_CHAIN: Chain<Gearbox> = &[
    ("parameters", specs::gearbox_from_parameters),
    ("text", specs::gearbox_from_text),
];

pub const BODY_CHAIN: Chain<Body> = &[
    ("parameters", specs::body_from_parameters),
    ("text", specs::body_from_text),
];

pub const CONDITION_CHAIN: Chain<Condition> = &[
    ("parameters", specs::condition_from_parameters),
    ("text", specs::condition_from_text),
];

pub const COLOR_CHAIN: Chain<String> = &[
    ("parameters", specs::color_from_parameters),
    ("text", specs::color_from_text),
];

pub const BRAND_CHAIN: Chain<String> = &[
    ("breadcrumbs", vehicle::brand_from_breadcrumbs),
    ("url-slug", vehicle::brand_from_slug),
];

pub const MODEL_CHAIN: Chain<String> = &[("url-slug", vehicle::model_from_slug)];

/// Run a chain, stopping at the first strategy that yields a value
pub fn first_success<T: Debug>(field: &str, page: &ListingPage, chain: Chain<T>) -> Option<T> {
    for (name, strategy) in chain {
        if let Some(value) = strategy(page) {
            debug!(field, strategy = *name, ?value, "field resolved");
            return Some(value);
        }
    }
    debug!(field, "no strategy matched, using sentinel");
    None
}

/// Parse a listing document and extract a fully populated record.
///
/// The only error is an unparseable document; missing fields become sentinels.
pub fn extract(html: &str, source_url: &str) -> Result<ListingRecord> {
    let page = ListingPage::parse(html, source_url)?;
    Ok(extract_page(&page))
}

/// Extract a record from an already parsed page
pub fn extract_page(page: &ListingPage) -> ListingRecord {
    let price = first_success("price", page, PRICE_CHAIN);
    let (price, price_display) = match price {
        Some(p) => (p.amount, p.display),
        None => (0.0, "0 EUR".to_string()),
    };

    let record = ListingRecord {
        title: first_success("title", page, TITLE_CHAIN).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        price,
        price_display,
        brand: first_success("brand", page, BRAND_CHAIN).unwrap_or_else(|| UNKNOWN.to_string()),
        model: first_success("model", page, MODEL_CHAIN).unwrap_or_else(|| UNKNOWN.to_string()),
        year: first_success("year", page, YEAR_CHAIN).unwrap_or(0),
        mileage_km: first_success("mileage", page, MILEAGE_CHAIN).unwrap_or(0),
        fuel: first_success("fuel", page, FUEL_CHAIN).unwrap_or_default(),
        gearbox: first_success("gearbox", page, GEARBOX_CHAIN).unwrap_or_default(),
        body: first_success("body", page, BODY_CHAIN).unwrap_or_default(),
        power_hp: first_success("power", page, POWER_CHAIN),
        engine_size_cc: first_success("engine_size", page, ENGINE_SIZE_CHAIN),
        condition: first_success("condition", page, CONDITION_CHAIN).unwrap_or_default(),
        color: first_success("color", page, COLOR_CHAIN).unwrap_or_else(|| UNKNOWN.to_string()),
        source_url: page.source_url.clone(),
    };

    info!(
        url = %record.source_url,
        brand = %record.brand,
        model = %record.model,
        year = record.year,
        price = %record.price_display,
        "listing extracted"
    );
    record
}
