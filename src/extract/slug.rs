//! Listing URL slug parsing.
//!
//! Listing URLs look like `/d/oferta/bmw-x5-2018-xdrive30d-IDhXy12.html`;
//! the last path segment minus extension and ID suffix is the slug.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ID_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-ID[A-Za-z0-9]+$").expect("Invalid ID suffix regex"));

/// Lower-cased slug of a listing URL, without extension and listing ID
pub fn listing_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;

    let segment = segment
        .strip_suffix(".html")
        .or_else(|| segment.strip_suffix(".htm"))
        .unwrap_or(segment);
    let slug = ID_SUFFIX_RE.replace(segment, "").to_lowercase();

    (!slug.is_empty()).then_some(slug)
}

/// True for a bare four-digit token such as "2018"
pub fn is_year_token(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}
