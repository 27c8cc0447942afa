//! Rule-based article recommendations: interest matching blended with
//! popularity, plus a user-agnostic trending list.

pub mod engine;
pub mod info;
pub mod interest;
pub mod popularity;
pub mod stores;
pub mod trending;

pub use engine::RecommendationEngine;
pub use info::AlgorithmInfo;
pub use interest::{InterestMatch, InterestMatcher};
pub use popularity::{Engagement, PopularityRanker};
pub use stores::Stores;
pub use trending::TrendingAggregator;

pub mod prelude {
    pub use super::{AlgorithmInfo, RecommendationEngine, Stores};
    pub use rec_core::{EngineConfig, Error, Limit, RecommendationSet, Result, TrendingEntry};
}
