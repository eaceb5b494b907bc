//! Title strategies, most reliable first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::slug;
use crate::normalize::normalize;
use crate::page::ListingPage;

/// Titles that name the site rather than the listing
static GENERIC_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:olx|autovit|publi24)(?:\.ro)?\b|anun[tț]uri\s+gratuite")
        .expect("Invalid generic title regex")
});

/// " - OLX.ro", " | Autovit" and similar suffixes
static SITE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[-|•–]\s*(?:olx|autovit|publi24)(?:\.ro)?\b.*$")
        .expect("Invalid site suffix regex")
});

/// Document and heading titles shorter than this are rejected
const MIN_TITLE_CHARS: usize = 10;

/// Linked-data types whose name is never the listing's title
const NON_LISTING_TYPES: &[&str] = &["Organization", "WebSite", "WebPage", "BreadcrumbList"];

pub fn is_generic(title: &str) -> bool {
    GENERIC_TITLE_RE.is_match(title)
}

/// `og:title` / `twitter:title` metadata
pub fn from_meta(page: &ListingPage) -> Option<String> {
    ["og:title", "twitter:title"]
        .iter()
        .filter_map(|key| page.meta(key))
        .map(normalize)
        .find(|t| !t.is_empty() && !is_generic(t))
}

/// The `<title>` element with the site suffix stripped
pub fn from_document_title(page: &ListingPage) -> Option<String> {
    let raw = page.title.as_deref()?;
    let stripped = normalize(&SITE_SUFFIX_RE.replace(raw, ""));
    (stripped.chars().count() >= MIN_TITLE_CHARS && !is_generic(&stripped)).then_some(stripped)
}

/// First h1-h3 long enough to be a listing title
pub fn from_heading(page: &ListingPage) -> Option<String> {
    page.headings
        .iter()
        .find(|h| h.chars().count() > MIN_TITLE_CHARS && !is_generic(h))
        .cloned()
}

/// `name` or `headline` of a linked-data item
pub fn from_json_ld(page: &ListingPage) -> Option<String> {
    page.json_ld
        .iter()
        .filter(|item| !is_non_listing_type(item))
        .flat_map(|item| ["name", "headline"].map(|key| item.get(key).and_then(|v| v.as_str())))
        .flatten()
        .map(normalize)
        .find(|t| !t.is_empty() && !is_generic(t))
}

/// Title-cased words of the listing URL slug
pub fn from_slug(page: &ListingPage) -> Option<String> {
    let slug = slug::listing_slug(page.slug_url())?;
    let title = slug
        .split('-')
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    (!title.is_empty()).then_some(title)
}

fn is_non_listing_type(item: &serde_json::Value) -> bool {
    match item.get("@type") {
        Some(serde_json::Value::String(t)) => NON_LISTING_TYPES.contains(&t.as_str()),
        _ => false,
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
