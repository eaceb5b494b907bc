//! The canonical listing record and its closed category types.
//!
//! Every field is either a validated value or an explicit sentinel
//! (`"Unknown"`, `0`, `None`, or the `Unknown` category variant).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::fold;

/// Sentinel for unresolved text fields and categories
pub const UNKNOWN: &str = "Unknown";

/// Sentinel title when every title strategy fails
pub const UNKNOWN_TITLE: &str = "Titlu necunoscut";

/// Accepted manufacture years
pub const YEAR_RANGE: RangeInclusive<u32> = 1990..=2025;
/// Accepted odometer readings in km
pub const MILEAGE_RANGE: RangeInclusive<u32> = 0..=1_500_000;
/// Accepted engine power in hp
pub const POWER_RANGE: RangeInclusive<u32> = 30..=2000;
/// Accepted engine displacement in cc
pub const ENGINE_SIZE_RANGE: RangeInclusive<u32> = 500..=8000;

/// Closed category enum with a synonym table, an `Other` pass-through for
/// unmapped keywords, and an `Unknown` sentinel.
macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $canonical:literal [$($synonym:literal),* $(,)?]),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $($variant,)*
            /// Keyword found next to the label but absent from the synonym table
            Other(String),
            #[default]
            Unknown,
        }

        impl $name {
            /// Every mapped variant, in synonym-table order
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Canonical keyword, the raw pass-through keyword, or `"Unknown"`
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $canonical,)*
                    $name::Other(raw) => raw,
                    $name::Unknown => UNKNOWN,
                }
            }

            /// Map a single keyword through the synonym table
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                let keyword = fold(keyword);
                $(
                    if keyword == $canonical $(|| keyword == $synonym)* {
                        return Some($name::$variant);
                    }
                )*
                None
            }

            /// Map the first keyword of `value` that the synonym table knows.
            /// Falls back to passing the first word through as `Other`.
            pub fn from_value(value: &str) -> Option<Self> {
                let folded = fold(value);
                let words: Vec<&str> = folded
                    .split(|c: char| !(c.is_alphanumeric() || c == '-'))
                    .filter(|w| !w.is_empty())
                    .collect();

                words
                    .iter()
                    .find_map(|w| Self::from_keyword(w))
                    .or_else(|| words.first().map(|w| $name::Other(w.to_string())))
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_keyword(s).ok_or_else(|| {
                    let accepted: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                    format!("unknown value '{}', expected one of: {}", s, accepted.join(", "))
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                if raw.eq_ignore_ascii_case(UNKNOWN) {
                    return Ok($name::Unknown);
                }
                Ok(Self::from_keyword(&raw).unwrap_or_else(|| $name::Other(fold(&raw))))
            }
        }
    };
}

category! {
    /// Fuel type
    Fuel {
        Diesel => "diesel" ["motorina"],
        Petrol => "petrol" ["benzina", "benzin", "gasoline"],
        Lpg => "lpg" ["gpl"],
        Hybrid => "hybrid" ["hibrid", "hibrida"],
        Electric => "electric" ["electrica", "ev"],
    }
}

category! {
    /// Transmission type
    Gearbox {
        Manual => "manual" ["manuala"],
        Automatic => "automatic" ["automata", "automat", "automatica"],
    }
}

category! {
    /// Body style
    Body {
        Sedan => "sedan" ["berlina", "limuzina"],
        Suv => "suv" ["off-road", "offroad", "teren"],
        EstateCar => "estate-car" ["break", "combi", "kombi", "estate", "touring", "wagon"],
        Coupe => "coupe" [],
        Hatchback => "hatchback" ["hatch", "compacta"],
        Pickup => "pickup" ["pick-up"],
    }
}

category! {
    /// New or used vehicle
    Condition {
        New => "new" ["nou", "noua"],
        Used => "used" ["utilizat", "utilizata", "folosit", "folosita", "second"],
    }
}

/// A vehicle listing extracted from one classified-ad document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    /// Currency-normalized numeric price, 0.0 when unknown
    pub price: f64,
    /// Price as shown, e.g. "18 500 EUR"
    pub price_display: String,
    pub brand: String,
    pub model: String,
    /// Manufacture year, 0 when unknown
    pub year: u32,
    pub mileage_km: u32,
    pub fuel: Fuel,
    pub gearbox: Gearbox,
    pub body: Body,
    pub power_hp: Option<u32>,
    pub engine_size_cc: Option<u32>,
    pub condition: Condition,
    pub color: String,
    pub source_url: String,
}

impl ListingRecord {
    /// A record with every field at its sentinel
    pub fn unknown(source_url: &str) -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            price: 0.0,
            price_display: "0 EUR".to_string(),
            brand: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            year: 0,
            mileage_km: 0,
            fuel: Fuel::Unknown,
            gearbox: Gearbox::Unknown,
            body: Body::Unknown,
            power_hp: None,
            engine_size_cc: None,
            condition: Condition::Unknown,
            color: UNKNOWN.to_string(),
            source_url: source_url.to_string(),
        }
    }

    pub fn has_brand(&self) -> bool {
        self.brand != UNKNOWN
    }

    pub fn has_model(&self) -> bool {
        self.model != UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_map_to_canonical() {
        assert_eq!(Fuel::from_keyword("Benzină"), Some(Fuel::Petrol));
        assert_eq!(Fuel::from_keyword("GPL"), Some(Fuel::Lpg));
        assert_eq!(Gearbox::from_keyword("automată"), Some(Gearbox::Automatic));
        assert_eq!(Gearbox::from_keyword("Manuala"), Some(Gearbox::Manual));
        assert_eq!(Body::from_keyword("break"), Some(Body::EstateCar));
        assert_eq!(Condition::from_keyword("Utilizat"), Some(Condition::Used));
        assert_eq!(Fuel::from_keyword("hidrogen"), None);
    }

    #[test]
    fn test_from_value_picks_first_known_word() {
        assert_eq!(Fuel::from_value("Hibrid benzina"), Some(Fuel::Hybrid));
        assert_eq!(Fuel::from_value("Benzina + GPL"), Some(Fuel::Petrol));
        assert_eq!(Body::from_value("Pick-up"), Some(Body::Pickup));
    }

    #[test]
    fn test_from_value_passes_unmapped_through() {
        assert_eq!(Fuel::from_value("Hidrogen"), Some(Fuel::Other("hidrogen".into())));
        assert_eq!(Fuel::from_value("  "), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Body::EstateCar.to_string(), "estate-car");
        assert_eq!(Fuel::Unknown.to_string(), "Unknown");

        let json = serde_json::to_string(&Gearbox::Automatic).unwrap();
        assert_eq!(json, "\"automatic\"");
        let back: Gearbox = serde_json::from_str("\"automata\"").unwrap();
        assert_eq!(back, Gearbox::Automatic);
        let unknown: Fuel = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(unknown, Fuel::Unknown);
    }

    #[test]
    fn test_from_str_rejects_unmapped() {
        assert_eq!("diesel".parse::<Fuel>(), Ok(Fuel::Diesel));
        assert!("steam".parse::<Fuel>().is_err());
    }

    #[test]
    fn test_unknown_record() {
        let record = ListingRecord::unknown("https://www.olx.ro/d/oferta/x.html");
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.price_display, "0 EUR");
        assert!(!record.has_brand());
        assert!(!record.has_model());
        assert_eq!(record.year, 0);
        assert_eq!(record.power_hp, None);
    }
}
