//! Known vehicle brands: display name, marketplace slug, and aliases.

use once_cell::sync::Lazy;

use crate::normalize::fold;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    /// Canonical display name stored on the record
    pub name: &'static str,
    /// Path segment used by the marketplace search
    pub slug: &'static str,
    /// Other spellings seen in breadcrumbs and listing URLs
    pub aliases: &'static [&'static str],
}

pub const BRANDS: &[Brand] = &[
    Brand { name: "Alfa Romeo", slug: "alfa-romeo", aliases: &["alfa"] },
    Brand { name: "Audi", slug: "audi", aliases: &[] },
    Brand { name: "BMW", slug: "bmw", aliases: &[] },
    Brand { name: "Chevrolet", slug: "chevrolet", aliases: &[] },
    Brand { name: "Citroen", slug: "citroen", aliases: &[] },
    Brand { name: "Cupra", slug: "cupra", aliases: &[] },
    Brand { name: "Dacia", slug: "dacia", aliases: &[] },
    Brand { name: "Fiat", slug: "fiat", aliases: &[] },
    Brand { name: "Ford", slug: "ford", aliases: &[] },
    Brand { name: "Honda", slug: "honda", aliases: &[] },
    Brand { name: "Hyundai", slug: "hyundai", aliases: &[] },
    Brand { name: "Jaguar", slug: "jaguar", aliases: &[] },
    Brand { name: "Jeep", slug: "jeep", aliases: &[] },
    Brand { name: "Kia", slug: "kia", aliases: &[] },
    Brand { name: "Land Rover", slug: "land-rover", aliases: &["landrover"] },
    Brand { name: "Lexus", slug: "lexus", aliases: &[] },
    Brand { name: "Mazda", slug: "mazda", aliases: &[] },
    Brand { name: "Mercedes-Benz", slug: "mercedes-benz", aliases: &["mercedes benz", "mercedes"] },
    Brand { name: "Mini", slug: "mini", aliases: &[] },
    Brand { name: "Mitsubishi", slug: "mitsubishi", aliases: &[] },
    Brand { name: "Nissan", slug: "nissan", aliases: &[] },
    Brand { name: "Opel", slug: "opel", aliases: &[] },
    Brand { name: "Peugeot", slug: "peugeot", aliases: &[] },
    Brand { name: "Porsche", slug: "porsche", aliases: &[] },
    Brand { name: "Renault", slug: "renault", aliases: &[] },
    Brand { name: "Seat", slug: "seat", aliases: &[] },
    Brand { name: "Skoda", slug: "skoda", aliases: &[] },
    Brand { name: "Smart", slug: "smart", aliases: &[] },
    Brand { name: "Subaru", slug: "subaru", aliases: &[] },
    Brand { name: "Suzuki", slug: "suzuki", aliases: &[] },
    Brand { name: "Tesla", slug: "tesla", aliases: &[] },
    Brand { name: "Toyota", slug: "toyota", aliases: &[] },
    Brand { name: "Volkswagen", slug: "volkswagen", aliases: &["vw"] },
    Brand { name: "Volvo", slug: "volvo", aliases: &[] },
];

/// Dash-joined spellings of every brand, longest first, so "land-rover"
/// and "mercedes-benz" win over shorter prefixes.
static SLUG_FORMS: Lazy<Vec<(String, &'static Brand)>> = Lazy::new(|| {
    let mut forms: Vec<(String, &'static Brand)> = BRANDS
        .iter()
        .flat_map(|brand| {
            std::iter::once(brand.slug)
                .chain(std::iter::once(brand.name))
                .chain(brand.aliases.iter().copied())
                .map(move |form| (fold(form).replace(' ', "-"), brand))
        })
        .collect();
    forms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    forms.dedup_by(|a, b| a.0 == b.0);
    forms
});

/// Find a brand by name or alias, ignoring case and diacritics
pub fn find(text: &str) -> Option<&'static Brand> {
    let wanted = fold(text);
    BRANDS.iter().find(|brand| {
        fold(brand.name) == wanted
            || brand.slug == wanted.replace(' ', "-")
            || brand.aliases.iter().any(|alias| *alias == wanted)
    })
}

/// Find a brand mentioned as whole words inside `text`, e.g. "Autoturisme BMW"
/// or "Land Rover Defender". Multi-word spellings win over shorter ones.
pub fn find_in(text: &str) -> Option<&'static Brand> {
    let words: Vec<String> = fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect();
    let dashed = format!("-{}-", words.join("-"));

    SLUG_FORMS
        .iter()
        .find(|(form, _)| dashed.contains(&format!("-{}-", form)))
        .map(|(_, brand)| *brand)
}

/// Match a brand at the start of a dash-delimited URL slug.
///
/// Returns the brand and the rest of the slug after the brand's dash.
pub fn match_slug_prefix(slug: &str) -> Option<(&'static Brand, &str)> {
    SLUG_FORMS.iter().find_map(|(form, brand)| {
        if slug == form {
            Some((*brand, ""))
        } else {
            slug.strip_prefix(form.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
                .map(|rest| (*brand, rest))
        }
    })
}

/// Marketplace slug for a brand name, lower-cased text when unlisted
pub fn slug_for(name: &str) -> String {
    match find(name) {
        Some(brand) => brand.slug.to_string(),
        None => name.trim().to_lowercase().replace(' ', "-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_and_alias() {
        assert_eq!(find("bmw").map(|b| b.name), Some("BMW"));
        assert_eq!(find("Mercedes").map(|b| b.name), Some("Mercedes-Benz"));
        assert_eq!(find("Land Rover").map(|b| b.name), Some("Land Rover"));
        assert_eq!(find("land-rover").map(|b| b.name), Some("Land Rover"));
        assert!(find("Autoturisme").is_none());
    }

    #[test]
    fn test_find_in_matches_whole_words() {
        assert_eq!(find_in("BMW X5").map(|b| b.name), Some("BMW"));
        assert_eq!(find_in("Autoturisme BMW").map(|b| b.name), Some("BMW"));
        assert_eq!(find_in("Mercedes-Benz GLE").map(|b| b.name), Some("Mercedes-Benz"));
        assert_eq!(find_in("Land Rover Defender").map(|b| b.name), Some("Land Rover"));
        assert!(find_in("Kiablue").is_none());
        assert!(find_in("Autoturisme").is_none());
        assert!(find_in("Auto, moto si ambarcatiuni").is_none());
    }

    #[test]
    fn test_match_slug_prefix_multi_word() {
        let (brand, rest) = match_slug_prefix("land-rover-discovery-sport-2019").unwrap();
        assert_eq!(brand.name, "Land Rover");
        assert_eq!(rest, "discovery-sport-2019");

        let (brand, rest) = match_slug_prefix("mercedes-benz-c-class").unwrap();
        assert_eq!(brand.name, "Mercedes-Benz");
        assert_eq!(rest, "c-class");
    }

    #[test]
    fn test_match_slug_prefix_requires_dash_boundary() {
        assert!(match_slug_prefix("kiablue-car").is_none());
        assert_eq!(match_slug_prefix("kia").map(|(b, r)| (b.name, r)), Some(("Kia", "")));
        assert!(match_slug_prefix("vand-bmw-x5").is_none());
    }

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for("Mercedes-Benz"), "mercedes-benz");
        assert_eq!(slug_for("BMW"), "bmw");
        assert_eq!(slug_for("Great Wall"), "great-wall");
    }
}
