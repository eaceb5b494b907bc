//! Brand and model strategies.

use crate::brands;
use crate::extract::slug::{is_year_token, listing_slug};
use crate::page::ListingPage;

/// First breadcrumb entry mentioning a known brand
pub fn brand_from_breadcrumbs(page: &ListingPage) -> Option<String> {
    page.breadcrumbs
        .iter()
        .find_map(|crumb| brands::find_in(crumb))
        .map(|brand| brand.name.to_string())
}

/// Brand at the start of the listing URL slug
pub fn brand_from_slug(page: &ListingPage) -> Option<String> {
    let slug = listing_slug(page.slug_url())?;
    brands::match_slug_prefix(&slug).map(|(brand, _)| brand.name.to_string())
}

/// Token right after the brand in the URL slug, unless it is the year
pub fn model_from_slug(page: &ListingPage) -> Option<String> {
    let slug = listing_slug(page.slug_url())?;
    let (_, rest) = brands::match_slug_prefix(&slug)?;
    let token = rest.split('-').find(|t| !t.is_empty())?;

    if is_year_token(token) {
        return None;
    }
    Some(token.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_at(url: &str) -> ListingPage {
        ListingPage::parse("<html><body></body></html>", url).unwrap()
    }

    #[test]
    fn test_brand_from_breadcrumbs() {
        let html = r#"<html><body><ol data-testid="breadcrumbs">
            <li><a href="/">Pagina principala</a></li>
            <li><a href="/auto/">Autoturisme</a></li>
            <li><a href="/auto/mercedes-benz/">Mercedes-Benz</a></li>
        </ol></body></html>"#;
        let page = ListingPage::parse(html, "https://www.olx.ro/d/oferta/x.html").unwrap();
        assert_eq!(brand_from_breadcrumbs(&page), Some("Mercedes-Benz".into()));
    }

    #[test]
    fn test_brand_inside_breadcrumb_text() {
        let html = r#"<html><body><nav aria-label="breadcrumb">
            <a href="/">Pagina principala</a>
            <a href="/auto/">Autoturisme</a>
            <a href="/auto/bmw/x5/">BMW X5</a>
        </nav></body></html>"#;
        let page = ListingPage::parse(html, "https://www.olx.ro/d/oferta/x.html").unwrap();
        assert_eq!(brand_from_breadcrumbs(&page), Some("BMW".into()));

        let html = r#"<html><body><ol data-testid="breadcrumbs">
            <li><a href="/auto/">Autoturisme</a></li>
            <li><a href="/auto/kia/">Autoturisme Kia</a></li>
        </ol></body></html>"#;
        let page = ListingPage::parse(html, "https://www.olx.ro/d/oferta/x.html").unwrap();
        assert_eq!(brand_from_breadcrumbs(&page), Some("Kia".into()));
    }

    #[test]
    fn test_brand_and_model_from_slug() {
        let page = page_at("https://www.olx.ro/d/oferta/bmw-x5-2018-xdrive30d-IDhXy12.html");
        assert_eq!(brand_from_slug(&page), Some("BMW".into()));
        assert_eq!(model_from_slug(&page), Some("X5".into()));
    }

    #[test]
    fn test_multi_word_brand_slug() {
        let page = page_at("https://www.olx.ro/d/oferta/land-rover-discovery-sport-IDaB12.html");
        assert_eq!(brand_from_slug(&page), Some("Land Rover".into()));
        assert_eq!(model_from_slug(&page), Some("DISCOVERY".into()));
    }

    #[test]
    fn test_model_skips_year_token() {
        let page = page_at("https://www.olx.ro/d/oferta/audi-2017-impecabil-IDq9.html");
        assert_eq!(brand_from_slug(&page), Some("Audi".into()));
        assert_eq!(model_from_slug(&page), None);
    }

    #[test]
    fn test_unknown_brand_slug() {
        let page = page_at("https://www.olx.ro/d/oferta/vand-masina-urgent-IDq9.html");
        assert_eq!(brand_from_slug(&page), None);
        assert_eq!(model_from_slug(&page), None);
    }
}
