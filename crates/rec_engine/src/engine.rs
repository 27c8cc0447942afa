use rec_core::{
    EngineConfig, Error, InteractionFilter, InteractionKind, Limit, Recommendation, RecommendationMetadata,
    RecommendationSet, Result, Strategy, TrendingEntry, UserSummary,
};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::info::AlgorithmInfo;
use crate::interest::InterestMatcher;
use crate::popularity::PopularityRanker;
use crate::stores::{within, Stores};
use crate::trending::TrendingAggregator;

/// Stateless orchestrator. Every call works on a fresh snapshot of the stores.
pub struct RecommendationEngine {
    config: EngineConfig,
    stores: Stores,
    matcher: InterestMatcher,
    popularity: PopularityRanker,
    trending: TrendingAggregator,
}

impl RecommendationEngine {
    pub fn new(stores: Stores, config: EngineConfig) -> Self {
        let timeout = config.store_timeout();
        Self {
            matcher: InterestMatcher::new(config.interest.clone()),
            popularity: PopularityRanker::new(config.popularity.clone(), stores.interactions.clone(), timeout),
            trending: TrendingAggregator::new(
                config.trending.clone(),
                config.trending_window(),
                stores.content.clone(),
                stores.interactions.clone(),
                timeout,
            ),
            stores,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// How many slots interest matching may fill.
    pub fn interest_limit(&self, limit: Limit) -> usize {
        ((limit.get() as f64 * self.config.interest_share).ceil() as usize).min(limit.get())
    }

    pub async fn get_recommendations_for_user(&self, user_id: &str, limit: Limit) -> Result<RecommendationSet> {
        let timeout = self.config.store_timeout();
        let (user, viewed, articles) = tokio::try_join!(
            within(timeout, "get user", self.stores.identity.get_user(user_id)),
            within(
                timeout,
                "list user views",
                self.stores
                    .interactions
                    .list_by_user(user_id, InteractionFilter::kind(InteractionKind::View)),
            ),
            within(timeout, "list articles", self.stores.content.list_articles()),
        )?;
        let user = user.ok_or_else(|| Error::user_not_found(user_id))?;

        let viewed: HashSet<String> = viewed.into_iter().map(|i| i.article_id).collect();
        let mut seen = HashSet::new();
        let candidates: Vec<_> = articles
            .into_iter()
            .filter(|a| !viewed.contains(&a.id) && seen.insert(a.id.clone()))
            .collect();
        debug!(
            user_id,
            excluded = viewed.len(),
            candidates = candidates.len(),
            "Built candidate pool"
        );

        let interest_limit = self.interest_limit(limit);
        let interest_based = self.matcher.recommend(&user.interests, &candidates, interest_limit);

        // The popularity pass absorbs whatever interest matching did not fill
        let popularity_limit = limit.get().saturating_sub(interest_based.len());
        let popularity_based = if popularity_limit > 0 {
            let chosen: HashSet<&str> = interest_based.iter().map(|r| r.article.id.as_str()).collect();
            let remaining = candidates
                .iter()
                .filter(|a| !chosen.contains(a.id.as_str()))
                .cloned()
                .collect();
            self.popularity.recommend(remaining, popularity_limit).await?
        } else {
            Vec::new()
        };

        let mut recommendations: Vec<Recommendation> =
            interest_based.into_iter().chain(popularity_based).collect();
        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations.truncate(limit.get());

        let count = |strategy: Strategy| recommendations.iter().filter(|r| r.strategy == strategy).count();
        let metadata = RecommendationMetadata {
            total: recommendations.len(),
            interest_based: count(Strategy::InterestBased),
            popularity_based: count(Strategy::PopularityBased),
            algorithm: self.config.algorithm.clone(),
        };
        info!(
            user_id,
            total = metadata.total,
            interest_based = metadata.interest_based,
            popularity_based = metadata.popularity_based,
            "✨ Generated recommendations"
        );

        Ok(RecommendationSet {
            user: UserSummary::from(&user),
            recommendations,
            metadata,
        })
    }

    pub async fn get_trending_articles(&self, limit: Limit) -> Result<Vec<TrendingEntry>> {
        let entries = self.trending.get_trending_articles(limit).await?;
        info!(total = entries.len(), "📈 Computed trending articles");
        Ok(entries)
    }

    pub fn algorithm_info(&self) -> AlgorithmInfo {
        AlgorithmInfo::from_config(&self.config)
    }
}
