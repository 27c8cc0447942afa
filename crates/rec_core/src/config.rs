use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_ALGORITHM: &str = "rule-based-v1";

/// Longest accepted trending window, roughly a century.
pub const MAX_TRENDING_WINDOW_SECS: u64 = 100 * 366 * 24 * 3600;

/// Points contributed by a single interest term, per field it appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestWeights {
    pub title: f64,
    pub summary: f64,
    pub content: f64,
    /// Added once per article for every distinct matched term
    pub multi_match_bonus: f64,
}

impl Default for InterestWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            summary: 2.0,
            content: 1.0,
            multi_match_bonus: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularityWeights {
    pub like: f64,
    pub view: f64,
    /// Applied to the raw popularity score before blending with interest results
    pub scale: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            like: 2.0,
            view: 1.0,
            scale: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingWeights {
    pub like: f64,
    pub view: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self { like: 3.0, view: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub algorithm: String,
    pub interest: InterestWeights,
    pub popularity: PopularityWeights,
    pub trending: TrendingWeights,
    /// Share of the requested limit reserved for interest matches
    pub interest_share: f64,
    pub store_timeout_ms: u64,
    /// Only count interactions newer than this many seconds; `None` scans everything
    pub trending_window_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            interest: InterestWeights::default(),
            popularity: PopularityWeights::default(),
            trending: TrendingWeights::default(),
            interest_share: 0.6,
            store_timeout_ms: 5_000,
            trending_window_secs: None,
        }
    }
}

impl EngineConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn trending_window(&self) -> Option<Duration> {
        self.trending_window_secs.map(Duration::from_secs)
    }

    /// Sub-millisecond timeouts round up to 1ms.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.interest_share) {
            return Err(Error::InvalidArgument(format!(
                "interest_share must be within [0, 1], got {}",
                self.interest_share
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(Error::InvalidArgument("store_timeout_ms must be positive".to_string()));
        }
        if let Some(window) = self.trending_window_secs {
            if window > MAX_TRENDING_WINDOW_SECS {
                return Err(Error::InvalidArgument(format!(
                    "trending_window_secs must be at most {}, got {}",
                    MAX_TRENDING_WINDOW_SECS, window
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.algorithm, "rule-based-v1");
        assert_eq!(config.interest.title, 3.0);
        assert_eq!(config.popularity.scale, 0.1);
        assert_eq!(config.trending.like, 3.0);
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert!(config.trending_window().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let raw = r#"{"interest": {"title": 4.0}, "trending_window_secs": 3600}"#;
        let config = EngineConfig::from_json_str(raw).unwrap();
        assert_eq!(config.interest.title, 4.0);
        assert_eq!(config.interest.summary, 2.0);
        assert_eq!(config.trending_window(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_rejects_bad_share() {
        assert!(EngineConfig::from_json_str(r#"{"interest_share": 1.5}"#).is_err());
    }

    #[test]
    fn test_rejects_huge_trending_window() {
        let err = EngineConfig::from_json_str(r#"{"trending_window_secs": 10000000000000}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let max = format!(r#"{{"trending_window_secs": {}}}"#, MAX_TRENDING_WINDOW_SECS);
        assert!(EngineConfig::from_json_str(&max).is_ok());
    }

    #[test]
    fn test_store_timeout_builder_never_zero() {
        let config = EngineConfig::default().with_store_timeout(Duration::from_micros(10));
        assert_eq!(config.store_timeout_ms, 1);
        assert!(config.validate().is_ok());

        let config = EngineConfig::default().with_store_timeout(Duration::from_millis(250));
        assert_eq!(config.store_timeout(), Duration::from_millis(250));
    }
}
