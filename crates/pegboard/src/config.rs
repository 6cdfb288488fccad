//! Run configuration.

use crate::error::{ConfigError, Result};
use crate::universe::Watchlist;
use pegboard_ratios::RatioConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default minimum spacing between provider requests, in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 250;

/// Default number of tickers fetched concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Everything a comparison run needs besides the CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tickers to compare and the table title
    pub watchlist: Watchlist,
    /// Ratio conventions
    pub ratios: RatioConfig,
    /// Minimum milliseconds between provider requests
    pub rate_limit_ms: u64,
    /// Maximum in-flight ticker fetches
    pub concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watchlist: Watchlist::default(),
            ratios: RatioConfig::default(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl AppConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let damping = self.ratios.forward_growth_damping;
        if !damping.is_finite() || damping < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "forward_growth_damping must be a non-negative number, got {damping}"
            )));
        }
        if self.ratios.ttm_quarters == 0 || self.ratios.growth_lookback_quarters == 0 {
            return Err(ConfigError::Invalid(
                "quarter counts must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Request spacing as a duration.
    pub const fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegboard_ratios::PegDenominator;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.watchlist, Watchlist::technology());
        assert_eq!(config.rate_limit(), Duration::from_millis(250));
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"ratios":{"peg_denominator":"fraction"},"concurrency":2}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.ratios.peg_denominator, PegDenominator::Fraction);
        assert_eq!(config.ratios.forward_growth_damping, 0.8);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.watchlist, Watchlist::technology());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            watchlist: Watchlist::new("Chips", ["NVDA", "AMD"]).unwrap(),
            rate_limit_ms: 500,
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[rstest]
    #[case(r#"{"concurrency":0}"#)]
    #[case(r#"{"ratios":{"forward_growth_damping":-1.0}}"#)]
    #[case(r#"{"ratios":{"ttm_quarters":0}}"#)]
    fn test_invalid_values(#[case] json: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
