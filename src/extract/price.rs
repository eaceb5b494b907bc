//! Price strategies: structured metadata first, then visible text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::normalize::{extract_integer, normalize};
use crate::page::ListingPage;

/// Digit run (optionally grouped, optionally with cents) followed by a currency token
static PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,3}(?:[ .,]\d{3})+|\d+)(?:[.,]\d{1,2})?\s*(€|euro\b|eur\b|lei\b|ron\b)")
        .expect("Invalid price regex")
});

/// Text matches at or below this are counters, ratings, ids
const MIN_TEXT_PRICE: u64 = 100;

/// A resolved price: numeric amount plus its display form
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub amount: f64,
    pub display: String,
}

/// Currency code for a price token: EUR for euro spellings, LEI otherwise
pub fn currency_code(token: &str) -> &'static str {
    match token.trim().to_lowercase().as_str() {
        "€" | "eur" | "euro" => "EUR",
        _ => "LEI",
    }
}

/// `product:price:amount` + `product:price:currency` metadata
pub fn from_meta(page: &ListingPage) -> Option<Price> {
    let amount_text = page
        .meta("product:price:amount")
        .or_else(|| page.meta("og:price:amount"))?;
    let currency = page
        .meta("product:price:currency")
        .or_else(|| page.meta("og:price:currency"))?;

    let amount = parse_amount(amount_text)?;
    if amount <= 0.0 {
        debug!(amount, "ignoring non-positive metadata price");
        return None;
    }

    Some(Price {
        amount,
        display: format!("{} {}", normalize(amount_text), currency_code(currency)),
    })
}

/// First "<digits> <currency>" in the visible text above the noise floor
pub fn from_text(page: &ListingPage) -> Option<Price> {
    PRICE_RE.captures_iter(&page.text).find_map(|caps| {
        let digits = caps.get(1)?.as_str();
        let value = extract_integer(digits)?;
        if value <= MIN_TEXT_PRICE {
            debug!(value, "price below noise floor, skipping");
            return None;
        }
        let currency = currency_code(caps.get(2)?.as_str());
        Some(Price {
            amount: value as f64,
            display: format!("{} {}", digits, currency),
        })
    })
}

/// Amount from a metadata tag.
///
/// A trailing `.`/`,` group of one or two digits is the fractional part
/// ("18500.00", "18.500,50"); any other separator groups thousands, so
/// "18.500" is 18500 like the text tier reads it.
fn parse_amount(text: &str) -> Option<f64> {
    let compact: String = normalize(text).chars().filter(|c| *c != ' ').collect();

    if let Some((whole, fraction)) = compact.rsplit_once(|c| c == '.' || c == ',') {
        if (1..=2).contains(&fraction.len()) && fraction.chars().all(|c| c.is_ascii_digit()) {
            let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
            return format!("{}.{}", whole, fraction)
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite());
        }
    }
    extract_integer(&compact).map(|v| v as f64)
}
