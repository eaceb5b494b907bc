use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarscoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Listing request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Document could not be parsed: {0}")]
    ParseError(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Not a listing URL: {0}")]
    InvalidListingUrl(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CarscoutError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CarscoutError::HttpError(_) => Some(
                "Check your internet connection, or raise the timeout in `carscout config`"
            ),
            CarscoutError::HttpStatus { status, .. } if *status == 403 || *status == 429 => Some(
                "The site is throttling requests. Wait a bit or raise the delay in the [fetch] config section"
            ),
            CarscoutError::HttpStatus { .. } => Some(
                "Check that the listing is still online"
            ),
            CarscoutError::ParseError(_) => Some(
                "Make sure the file or response is an HTML page, e.g.: carscout inspect page.html"
            ),
            CarscoutError::InvalidListingUrl(_) => Some(
                "Pass a full listing link, e.g.: https://www.olx.ro/d/oferta/..."
            ),
            CarscoutError::TomlError(_) | CarscoutError::ConfigError(_) => Some(
                "Run `carscout config` to see the config path, or `carscout config --init` to reset it"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CarscoutError>;
