use rec_core::config::{InterestWeights, PopularityWeights, TrendingWeights};
use rec_core::{EngineConfig, Limit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitInfo {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Describes the weighting constants in use. Purely informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    pub version: String,
    pub description: String,
    pub interest: InterestWeights,
    pub popularity: PopularityWeights,
    pub trending: TrendingWeights,
    pub interest_share: f64,
    pub limits: LimitInfo,
}

impl AlgorithmInfo {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            version: config.algorithm.clone(),
            description: "Interest keyword matching blended with popularity; \
                          already viewed articles are excluded"
                .to_string(),
            interest: config.interest.clone(),
            popularity: config.popularity.clone(),
            trending: config.trending.clone(),
            interest_share: config.interest_share,
            limits: LimitInfo {
                min: Limit::MIN,
                max: Limit::MAX,
                default: Limit::DEFAULT,
            },
        }
    }
}

impl Default for AlgorithmInfo {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_default_constants() {
        let info = AlgorithmInfo::default();
        assert_eq!(info.version, "rule-based-v1");
        assert_eq!(info.interest.title, 3.0);
        assert_eq!(info.interest.summary, 2.0);
        assert_eq!(info.interest.content, 1.0);
        assert_eq!(info.interest.multi_match_bonus, 0.5);
        assert_eq!(info.popularity.like, 2.0);
        assert_eq!(info.trending.like, 3.0);
        assert_eq!(info.limits, LimitInfo { min: 1, max: 50, default: 10 });
    }
}
