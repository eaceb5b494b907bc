//! Listing document fetching.
//!
//! Network access lives here, outside the extraction core. The client's
//! identity is an explicit [`FetchConfig`] handed to [`HttpFetcher::new`];
//! each fetcher owns its agent.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CarscoutError, Result};
use crate::extract::extract;
use crate::listing::ListingRecord;

/// Desktop browser identity; bare library user agents get blocked
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// HTTP client identity, timeout and politeness delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    /// Lower bound of the random pause before each request
    pub delay_min_ms: u64,
    /// Upper bound of the random pause before each request
    pub delay_max_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "ro-RO,ro;q=0.9,en;q=0.8".to_string(),
            timeout_secs: 15,
            delay_min_ms: 2000,
            delay_max_ms: 4000,
        }
    }
}

impl FetchConfig {
    /// Random pause drawn from `[delay_min_ms, delay_max_ms]`
    pub fn politeness_delay(&self) -> Duration {
        if self.delay_max_ms == 0 || self.delay_min_ms >= self.delay_max_ms {
            return Duration::from_millis(self.delay_min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.delay_min_ms..=self.delay_max_ms);
        Duration::from_millis(ms)
    }
}

/// Source of listing documents
pub trait Fetcher {
    /// Fetch the HTML of `url`; anything but a 200 is an error
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher with a politeness delay before every request
pub struct HttpFetcher {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, config }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let delay = self.config.politeness_delay();
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "waiting before request");
            std::thread::sleep(delay);
        }

        info!(url, "fetching listing");
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .header("Accept-Language", &self.config.accept_language)
            .call()?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!(url, status, "listing request failed");
            return Err(CarscoutError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.into_body().read_to_string()?)
    }
}

/// Check that `url` is an absolute http(s) listing link
pub fn validate_listing_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| CarscoutError::InvalidListingUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CarscoutError::InvalidListingUrl(format!(
            "{}: only http and https links are supported",
            url
        )));
    }

    let host = parsed.host_str().unwrap_or_default();
    if !(host == "olx.ro" || host.ends_with(".olx.ro")) {
        warn!(host, "not an OLX Romania link, extraction may degrade");
    }

    Ok(parsed)
}

/// Fetch a listing and run the extraction pipeline over it
pub fn fetch_listing<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<ListingRecord> {
    let parsed = validate_listing_url(url)?;
    let html = fetcher.fetch(parsed.as_str())?;
    extract(&html, parsed.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    impl Fetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> Result<String> {
            self.pages.get(url).cloned().ok_or_else(|| CarscoutError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[test]
    fn test_validate_listing_url() {
        assert!(validate_listing_url("https://www.olx.ro/d/oferta/bmw-x5-IDa1.html").is_ok());
        assert!(validate_listing_url("https://example.com/car.html").is_ok());
        assert!(matches!(
            validate_listing_url("olx.ro/d/oferta/x"),
            Err(CarscoutError::InvalidListingUrl(_))
        ));
        assert!(matches!(
            validate_listing_url("ftp://olx.ro/x"),
            Err(CarscoutError::InvalidListingUrl(_))
        ));
    }

    #[test]
    fn test_politeness_delay_bounds() {
        let fixed = FetchConfig { delay_min_ms: 0, delay_max_ms: 0, ..FetchConfig::default() };
        assert_eq!(fixed.politeness_delay(), Duration::ZERO);

        let config = FetchConfig::default();
        for _ in 0..20 {
            let delay = config.politeness_delay();
            assert!(delay >= Duration::from_millis(2000));
            assert!(delay <= Duration::from_millis(4000));
        }
    }

    #[test]
    fn test_fetch_listing_runs_pipeline() {
        let url = "https://www.olx.ro/d/oferta/dacia-logan-2019-IDb7.html";
        let fetcher = StaticFetcher {
            pages: HashMap::from([(
                url.to_string(),
                "<html><body><p>Pret 7 500 €</p><p>Rulaj 90 000 km</p></body></html>".to_string(),
            )]),
        };

        let record = fetch_listing(&fetcher, url).unwrap();
        assert_eq!(record.brand, "Dacia");
        assert_eq!(record.model, "LOGAN");
        assert_eq!(record.price, 7500.0);
        assert_eq!(record.mileage_km, 90_000);
        assert_eq!(record.source_url, url);
    }

    #[test]
    fn test_fetch_listing_propagates_fetch_failure() {
        let fetcher = StaticFetcher { pages: HashMap::new() };
        let err = fetch_listing(&fetcher, "https://www.olx.ro/d/oferta/x.html");
        assert!(matches!(err, Err(CarscoutError::HttpStatus { status: 404, .. })));
    }
}
