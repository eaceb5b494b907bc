use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CarscoutError, Result};
use crate::fetch::FetchConfig;
use crate::search::{SearchSite, ToleranceConfig};

/// Global carscout configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default search and comparison windows
    #[serde(default)]
    pub tolerances: ToleranceConfig,

    /// HTTP client identity and politeness delay
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Marketplace the search URL points at
    #[serde(default)]
    pub search: SearchSite,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CarscoutError::ConfigError(e.to_string()))
    }

    /// Get the config file path
    ///
    /// Supports CARSCOUT_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("CARSCOUT_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "carscout")
            .ok_or_else(|| CarscoutError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.tolerances.engine_min, self.tolerances.engine_max) {
            if min > max {
                return Err(CarscoutError::ConfigError(format!(
                    "engine_min ({}) is larger than engine_max ({})",
                    min, max
                )));
            }
        }
        if self.fetch.delay_min_ms > self.fetch.delay_max_ms {
            return Err(CarscoutError::ConfigError(format!(
                "delay_min_ms ({}) is larger than delay_max_ms ({})",
                self.fetch.delay_min_ms, self.fetch.delay_max_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{Fuel, Gearbox};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tolerances.years, Some(2));
        assert_eq!(config.tolerances.km, Some(30_000));
        assert_eq!(config.tolerances.fuels, vec![Fuel::Diesel]);
        assert_eq!(config.fetch.timeout_secs, 15);
        assert_eq!(config.search.base_url, "https://www.olx.ro");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [tolerances]
            years = 3
            fuels = ["benzina", "hybrid"]

            [fetch]
            delay_min_ms = 0
            delay_max_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.tolerances.years, Some(3));
        assert_eq!(config.tolerances.fuels, vec![Fuel::Petrol, Fuel::Hybrid]);
        assert_eq!(config.tolerances.gearboxes, vec![Gearbox::Automatic]);
        assert_eq!(config.fetch.delay_max_ms, 0);
        assert_eq!(config.fetch.timeout_secs, 15);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_windows_can_be_switched_off() {
        let config = Config::from_toml(
            r#"
            [tolerances]
            years = "off"
            power = "off"
            km = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.tolerances.years, None);
        assert_eq!(config.tolerances.power, None);
        assert_eq!(config.tolerances.km, Some(0));
        assert_eq!(config.tolerances.engine_min, Some(1500));

        let text = config.to_toml().unwrap();
        assert!(text.contains("years = \"off\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_bands() {
        let err = Config::from_toml("[tolerances]\nengine_min = 3000\nengine_max = 1000\n");
        assert!(matches!(err, Err(CarscoutError::ConfigError(_))));

        let err = Config::from_toml("[fetch]\ndelay_min_ms = 5000\ndelay_max_ms = 1000\n");
        assert!(matches!(err, Err(CarscoutError::ConfigError(_))));
    }
}
