//! Specification strategies: year, mileage, power, engine size, the
//! category fields and colour.
//!
//! Each field has two tiers. The parameter tier reads labelled rows such as
//! `Rulaj: 120 000 km` from the listing's parameter list; the text tier runs
//! a keyword/unit regex over the folded visible text. Numeric values are
//! range-checked in both tiers and rejected values are skipped, never kept.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::listing::{
    Body, Condition, Fuel, Gearbox, ENGINE_SIZE_RANGE, MILEAGE_RANGE, POWER_RANGE, YEAR_RANGE,
};
use crate::normalize::{extract_integer, fold};
use crate::page::ListingPage;

// Text-tier patterns run over folded (lower-case, diacritic-free) text.
// Group 1 always holds the value.

static YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:an|anul|fabricat\w*|year)\b\D{0,25}?\b(\d{4})\b").expect("Invalid year regex")
});

static MILEAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3}(?:[ .,]\d{3})+|\d+)\s*km(?:$|[^/\w])").expect("Invalid mileage regex")
});

static ENGINE_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3}(?:[ .,]\d{3})+|\d+)\s*(?:cm3|cmc|cm³|cc)(?:$|[^\w])")
        .expect("Invalid engine size regex")
});

static POWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)\s*(?:cp|hp|cai)(?:$|[^\w])").expect("Invalid power regex")
});

static FUEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:combustibil|carburant|fuel)\b\s*:?\s*([a-z][a-z0-9-]*)")
        .expect("Invalid fuel regex")
});

static GEARBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:cutie(?: de viteze)?|transmisie|gearbox|transmission)\b\s*:?\s*([a-z][a-z0-9-]*)")
        .expect("Invalid gearbox regex")
});

static BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:tip caroserie|caroserie|body type|body)\b\s*:?\s*([a-z][a-z0-9-]*)")
        .expect("Invalid body regex")
});

static CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:stare|condition)\b\s*:?\s*([a-z][a-z0-9-]*)").expect("Invalid condition regex")
});

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:culoare|colou?r)\b\s*:?\s*([a-z][a-z-]*)").expect("Invalid color regex")
});

// Parameter-tier labels, folded. Longer labels come before their prefixes.

const YEAR_LABELS: &[&str] = &[
    "an de fabricatie",
    "anul fabricatiei",
    "anul productiei",
    "an fabricatie",
    "year",
    "anul",
    "an",
];
const MILEAGE_LABELS: &[&str] = &["kilometraj", "kilometri", "rulaj", "mileage"];
const POWER_LABELS: &[&str] = &["putere motor", "putere", "power"];
const ENGINE_SIZE_LABELS: &[&str] = &[
    "capacitate cilindrica",
    "capacitate motor",
    "capacitate",
    "cilindree",
    "engine size",
];
const FUEL_LABELS: &[&str] = &["tip combustibil", "combustibil", "carburant", "fuel"];
const GEARBOX_LABELS: &[&str] = &[
    "cutie de viteze",
    "cutie viteze",
    "transmisie",
    "cutie",
    "gearbox",
    "transmission",
];
const BODY_LABELS: &[&str] = &["tip caroserie", "caroserie", "body type", "body"];
const CONDITION_LABELS: &[&str] = &["stare", "condition"];
const COLOR_LABELS: &[&str] = &["culoare", "colour", "color"];

/// A numeric field: where to look and what is plausible
struct NumericField {
    name: &'static str,
    labels: &'static [&'static str],
    pattern: &'static Lazy<Regex>,
    range: RangeInclusive<u32>,
}

static YEAR: NumericField = NumericField {
    name: "year",
    labels: YEAR_LABELS,
    pattern: &YEAR_RE,
    range: YEAR_RANGE,
};

static MILEAGE: NumericField = NumericField {
    name: "mileage",
    labels: MILEAGE_LABELS,
    pattern: &MILEAGE_RE,
    range: MILEAGE_RANGE,
};

static POWER: NumericField = NumericField {
    name: "power",
    labels: POWER_LABELS,
    pattern: &POWER_RE,
    range: POWER_RANGE,
};

static ENGINE_SIZE: NumericField = NumericField {
    name: "engine_size",
    labels: ENGINE_SIZE_LABELS,
    pattern: &ENGINE_SIZE_RE,
    range: ENGINE_SIZE_RANGE,
};

impl NumericField {
    fn from_parameters(&self, page: &ListingPage) -> Option<u32> {
        page.parameters.iter().find_map(|row| {
            let value = label_value(row, self.labels)?;
            self.accept(extract_integer(&value)?)
        })
    }

    fn from_text(&self, page: &ListingPage) -> Option<u32> {
        self.pattern.captures_iter(&page.folded).find_map(|caps| {
            let digits = caps.get(1)?.as_str();
            self.accept(extract_integer(digits)?)
        })
    }

    fn accept(&self, value: u64) -> Option<u32> {
        match u32::try_from(value) {
            Ok(v) if self.range.contains(&v) => Some(v),
            _ => {
                debug!(field = self.name, value, "implausible value rejected");
                None
            }
        }
    }
}

/// Value after a known label at the start of a parameter row, folded.
///
/// The label must be followed by a separator, so "an" never matches "anvelope".
pub fn label_value(row: &str, labels: &[&str]) -> Option<String> {
    let folded = fold(row);
    labels.iter().find_map(|label| {
        let rest = folded.strip_prefix(label)?;
        if !rest.starts_with([':', ' ']) {
            return None;
        }
        let value = rest.trim_start_matches([':', ' ']).trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn category_from_parameters<T>(
    page: &ListingPage,
    labels: &[&str],
    map: fn(&str) -> Option<T>,
) -> Option<T> {
    page.parameters
        .iter()
        .find_map(|row| label_value(row, labels).and_then(|value| map(&value)))
}

fn category_from_text<T>(page: &ListingPage, pattern: &Regex, map: fn(&str) -> Option<T>) -> Option<T> {
    let keyword = pattern.captures(&page.folded)?.get(1)?.as_str();
    map(keyword)
}

pub fn year_from_parameters(page: &ListingPage) -> Option<u32> {
    YEAR.from_parameters(page)
}

pub fn year_from_text(page: &ListingPage) -> Option<u32> {
    YEAR.from_text(page)
}

pub fn mileage_from_parameters(page: &ListingPage) -> Option<u32> {
    MILEAGE.from_parameters(page)
}

pub fn mileage_from_text(page: &ListingPage) -> Option<u32> {
    MILEAGE.from_text(page)
}

pub fn power_from_parameters(page: &ListingPage) -> Option<u32> {
    POWER.from_parameters(page)
}

pub fn power_from_text(page: &ListingPage) -> Option<u32> {
    POWER.from_text(page)
}

pub fn engine_size_from_parameters(page: &ListingPage) -> Option<u32> {
    ENGINE_SIZE.from_parameters(page)
}

pub fn engine_size_from_text(page: &ListingPage) -> Option<u32> {
    ENGINE_SIZE.from_text(page)
}

pub fn fuel_from_parameters(page: &ListingPage) -> Option<Fuel> {
    category_from_parameters(page, FUEL_LABELS, Fuel::from_value)
}

pub fn fuel_from_text(page: &ListingPage) -> Option<Fuel> {
    category_from_text(page, &FUEL_RE, Fuel::from_value)
}

pub fn gearbox_from_parameters(page: &ListingPage) -> Option<Gearbox> {
    category_from_parameters(page, GEARBOX_LABELS, Gearbox::from_value)
}

pub fn gearbox_from_text(page: &ListingPage) -> Option<Gearbox> {
    category_from_text(page, &GEARBOX_RE, Gearbox::from_value)
}

pub fn body_from_parameters(page: &ListingPage) -> Option<Body> {
    category_from_parameters(page, BODY_LABELS, Body::from_value)
}

pub fn body_from_text(page: &ListingPage) -> Option<Body> {
    category_from_text(page, &BODY_RE, Body::from_value)
}

pub fn condition_from_parameters(page: &ListingPage) -> Option<Condition> {
    category_from_parameters(page, CONDITION_LABELS, Condition::from_value)
}

pub fn condition_from_text(page: &ListingPage) -> Option<Condition> {
    category_from_text(page, &CONDITION_RE, Condition::from_value)
}

pub fn color_from_parameters(page: &ListingPage) -> Option<String> {
    category_from_parameters(page, COLOR_LABELS, first_word)
}

pub fn color_from_text(page: &ListingPage) -> Option<String> {
    category_from_text(page, &COLOR_RE, first_word)
}

fn first_word(value: &str) -> Option<String> {
    value.split_whitespace().next().map(str::to_string)
}
