use futures::future::try_join_all;
use rec_core::config::PopularityWeights;
use rec_core::{Article, InteractionKind, InteractionStore, Recommendation, Result, Strategy};
use std::sync::Arc;
use std::time::Duration;

use crate::stores::within;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    pub likes: u64,
    pub views: u64,
}

pub(crate) fn plural(count: u64, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

impl Engagement {
    fn reason(&self) -> String {
        match (self.likes, self.views) {
            (0, views) => format!("Trending with {}", plural(views, "view")),
            (likes, 0) => format!("Well-liked by {}", plural(likes, "reader")),
            (likes, views) => format!(
                "Popular with {} and {}",
                plural(likes, "like"),
                plural(views, "view")
            ),
        }
    }
}

/// Ranks articles by how much engagement they already have.
pub struct PopularityRanker {
    weights: PopularityWeights,
    interactions: Arc<dyn InteractionStore>,
    timeout: Duration,
}

impl PopularityRanker {
    pub fn new(weights: PopularityWeights, interactions: Arc<dyn InteractionStore>, timeout: Duration) -> Self {
        Self {
            weights,
            interactions,
            timeout,
        }
    }

    pub fn raw_score(&self, engagement: Engagement) -> f64 {
        engagement.likes as f64 * self.weights.like + engagement.views as f64 * self.weights.view
    }

    async fn engagement(&self, article_id: &str) -> Result<Engagement> {
        let likes = within(
            self.timeout,
            "count likes",
            self.interactions.count_by_article_and_kind(article_id, InteractionKind::Like),
        );
        let views = within(
            self.timeout,
            "count views",
            self.interactions.count_by_article_and_kind(article_id, InteractionKind::View),
        );
        let (likes, views) = tokio::try_join!(likes, views)?;
        Ok(Engagement { likes, views })
    }

    /// Fetch engagement for every candidate concurrently, then rank.
    pub async fn recommend(&self, candidates: Vec<Article>, limit: usize) -> Result<Vec<Recommendation>> {
        if limit == 0 || candidates.is_empty() {
            return Ok(Vec::new());
        }
        let engagements = try_join_all(candidates.iter().map(|a| self.engagement(&a.id))).await?;
        Ok(self.rank(candidates.into_iter().zip(engagements).collect(), limit))
    }

    /// Drop articles without engagement, order by raw popularity and attach
    /// the down-scaled score.
    pub fn rank(&self, engaged: Vec<(Article, Engagement)>, limit: usize) -> Vec<Recommendation> {
        let mut scored: Vec<(Article, Engagement, f64)> = engaged
            .into_iter()
            .map(|(article, engagement)| {
                let raw = self.raw_score(engagement);
                (article, engagement, raw)
            })
            .filter(|(_, _, raw)| *raw > 0.0)
            .collect();

        scored.sort_by(|a, b| b.2.total_cmp(&a.2));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(article, engagement, raw)| Recommendation {
                article,
                score: raw * self.weights.scale,
                reason: engagement.reason(),
                strategy: Strategy::PopularityBased,
                matched_interests: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rec_storage::MemoryStorage;

    fn ranker() -> PopularityRanker {
        PopularityRanker::new(
            PopularityWeights::default(),
            Arc::new(MemoryStorage::new()),
            Duration::from_secs(1),
        )
    }

    fn engaged(id: &str, likes: u64, views: u64) -> (Article, Engagement) {
        (Article::new(id, id, "", "dev"), Engagement { likes, views })
    }

    #[test]
    fn test_scaled_score() {
        let recs = ranker().rank(vec![engaged("a1", 3, 5)], 10);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 1.1).abs() < 1e-9);
        assert_eq!(recs[0].strategy, Strategy::PopularityBased);
        assert!(recs[0].matched_interests.is_none());
    }

    #[test]
    fn test_unengaged_articles_are_dropped() {
        let recs = ranker().rank(vec![engaged("cold", 0, 0), engaged("warm", 0, 1)], 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].article.id, "warm");
    }

    #[test]
    fn test_order_is_stable_for_ties() {
        let recs = ranker().rank(
            vec![engaged("first", 1, 0), engaged("top", 2, 0), engaged("second", 0, 2)],
            2,
        );
        let ids: Vec<_> = recs.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first"]);
    }

    #[test]
    fn test_reasons() {
        assert_eq!(Engagement { likes: 3, views: 5 }.reason(), "Popular with 3 likes and 5 views");
        assert_eq!(Engagement { likes: 1, views: 0 }.reason(), "Well-liked by 1 reader");
        assert_eq!(Engagement { likes: 0, views: 4 }.reason(), "Trending with 4 views");
    }
}
