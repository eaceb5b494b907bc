//! ListingPage - the traversable view of one listing document
//!
//! The document is parsed once and every source the extraction strategies
//! read from is collected up front: metadata tags, linked-data blocks,
//! headings, breadcrumbs, labelled parameter rows and the visible text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{CarscoutError, Result};
use crate::normalize::{fold, normalize};

/// Elements whose text is never shown to the reader
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name], meta[property], meta[itemprop]").expect("Invalid meta selector")
});

static JSON_LD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("Invalid JSON-LD selector")
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Invalid title selector"));

static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"link[rel="canonical"][href]"#).expect("Invalid canonical selector")
});

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("Invalid heading selector"));

static BREADCRUMB_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"[data-testid="breadcrumbs"] a,
           [data-testid="breadcrumb-item"],
           [data-cy="breadcrumbs"] a,
           nav[aria-label="breadcrumb"] a,
           nav[aria-label="Breadcrumb"] a,
           .breadcrumb a,
           .breadcrumbs a,
           [itemtype$="BreadcrumbList"] [itemprop="name"]"#,
    )
    .expect("Invalid breadcrumb selector")
});

static PARAMETER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"[data-testid="ad-parameters-container"] p,
           [data-testid="ad-parameters-container"] li,
           [data-testid="advert-details-item"],
           [data-testid="ad-parameter"],
           ul.parameters li,
           table.parameters tr,
           dl.parameters div"#,
    )
    .expect("Invalid parameter selector")
});

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Invalid body selector"));

/// Everything the field extractors read from one listing document
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// URL the document was fetched from
    pub source_url: String,
    /// `<link rel="canonical">` target, if present
    pub canonical_url: Option<String>,
    /// Meta tags (name/property/itemprop -> content), first occurrence wins
    pub meta_tags: HashMap<String, String>,
    /// Linked-data items, flattened out of arrays and `@graph`
    pub json_ld: Vec<serde_json::Value>,
    /// Text of the `<title>` element
    pub title: Option<String>,
    /// h1-h3 texts in document order
    pub headings: Vec<String>,
    /// Breadcrumb entries in document order
    pub breadcrumbs: Vec<String>,
    /// Labelled parameter rows ("Rulaj: 120 000 km")
    pub parameters: Vec<String>,
    /// Visible text, whitespace-normalized
    pub text: String,
    /// Visible text, lower-cased and diacritic-free
    pub folded: String,
}

impl ListingPage {
    /// Parse a listing document.
    ///
    /// Fails only when there is nothing to build a tree from: an empty
    /// document or one without any markup.
    pub fn parse(html: &str, source_url: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(CarscoutError::ParseError("document is empty".into()));
        }
        if !html.contains('<') {
            return Err(CarscoutError::ParseError("document contains no markup".into()));
        }

        let document = Html::parse_document(html);
        let mut page = Self {
            source_url: source_url.to_string(),
            ..Default::default()
        };

        page.extract_meta_tags(&document);
        page.extract_json_ld(&document);
        page.extract_title(&document);
        page.extract_canonical(&document);
        page.headings = collect_texts(&document, &HEADING_SELECTOR);
        page.breadcrumbs = collect_texts(&document, &BREADCRUMB_SELECTOR);
        page.parameters = collect_texts(&document, &PARAMETER_SELECTOR);
        page.extract_visible_text(&document);

        Ok(page)
    }

    /// URL used by the slug-based strategies: canonical first, then source
    pub fn slug_url(&self) -> &str {
        self.canonical_url.as_deref().unwrap_or(&self.source_url)
    }

    /// Look up a meta tag by name or property
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta_tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn extract_meta_tags(&mut self, document: &Html) {
        for element in document.select(&META_SELECTOR) {
            let value = element.value();
            let key = value
                .attr("property")
                .or_else(|| value.attr("name"))
                .or_else(|| value.attr("itemprop"));

            if let (Some(k), Some(c)) = (key, value.attr("content")) {
                self.meta_tags
                    .entry(k.to_lowercase())
                    .or_insert_with(|| c.to_string());
            }
        }
    }

    fn extract_json_ld(&mut self, document: &Html) {
        for element in document.select(&JSON_LD_SELECTOR) {
            let text: String = element.text().collect();
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) {
                flatten_json_ld(json, &mut self.json_ld);
            }
        }
    }

    fn extract_title(&mut self, document: &Html) {
        if let Some(element) = document.select(&TITLE_SELECTOR).next() {
            let title = normalize(&element.text().collect::<String>());
            if !title.is_empty() {
                self.title = Some(title);
            }
        }
    }

    fn extract_canonical(&mut self, document: &Html) {
        self.canonical_url = document
            .select(&CANONICAL_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
            .map(str::trim)
            .find(|href| href.starts_with("http://") || href.starts_with("https://"))
            .map(String::from);
    }

    /// Join every text node outside non-content elements
    fn extract_visible_text(&mut self, document: &Html) {
        let root = document
            .select(&BODY_SELECTOR)
            .next()
            .unwrap_or_else(|| document.root_element());

        let mut parts: Vec<&str> = Vec::new();
        for node in root.descendants() {
            if let Node::Text(text) = node.value() {
                let hidden = node.ancestors().any(|a| {
                    matches!(a.value(), Node::Element(e) if NON_CONTENT_TAGS.contains(&e.name()))
                });
                if !hidden {
                    parts.push(&**text);
                }
            }
        }

        self.text = normalize(&parts.join(" "));
        self.folded = fold(&self.text);
    }
}

/// Normalized, non-empty texts of every element matching `selector`
fn collect_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<Vec<_>>().join(" "))
}

/// Flatten linked data into individual items (handles `@graph` and arrays)
fn flatten_json_ld(json: serde_json::Value, items: &mut Vec<serde_json::Value>) {
    match json {
        serde_json::Value::Object(mut map) => {
            if let Some(serde_json::Value::Array(graph)) = map.remove("@graph") {
                for item in graph {
                    flatten_json_ld(item, items);
                }
            } else {
                items.push(serde_json::Value::Object(map));
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                flatten_json_ld(item, items);
            }
        }
        _ => {}
    }
}
