use chrono::Utc;
use futures::future::try_join_all;
use rec_core::config::TrendingWeights;
use rec_core::{
    ContentStore, Error, Interaction, InteractionFilter, InteractionKind, InteractionStore, Limit, Result,
    TrendingEntry,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::popularity::{plural, Engagement};
use crate::stores::within;

/// Per-article engagement in first-seen order.
fn tally(interactions: &[Interaction]) -> Vec<(String, Engagement)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, Engagement)> = Vec::new();
    for interaction in interactions {
        let slot = *index.entry(interaction.article_id.as_str()).or_insert_with(|| {
            counts.push((interaction.article_id.clone(), Engagement::default()));
            counts.len() - 1
        });
        match interaction.kind {
            InteractionKind::Like => counts[slot].1.likes += 1,
            InteractionKind::View => counts[slot].1.views += 1,
        }
    }
    counts
}

/// Global ranking by interaction volume, independent of any user.
pub struct TrendingAggregator {
    weights: TrendingWeights,
    window: Option<Duration>,
    content: Arc<dyn ContentStore>,
    interactions: Arc<dyn InteractionStore>,
    timeout: Duration,
}

impl TrendingAggregator {
    pub fn new(
        weights: TrendingWeights,
        window: Option<Duration>,
        content: Arc<dyn ContentStore>,
        interactions: Arc<dyn InteractionStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            weights,
            window,
            content,
            interactions,
            timeout,
        }
    }

    pub fn score(&self, engagement: Engagement) -> f64 {
        engagement.likes as f64 * self.weights.like + engagement.views as f64 * self.weights.view
    }

    pub async fn get_trending_articles(&self, limit: Limit) -> Result<Vec<TrendingEntry>> {
        let mut interactions = within(
            self.timeout,
            "list interactions",
            self.interactions.list_all(InteractionFilter::default()),
        )
        .await?;

        // A window reaching past the earliest representable instant covers everything
        let cutoff = self
            .window
            .and_then(|window| chrono::Duration::from_std(window).ok())
            .and_then(|window| Utc::now().checked_sub_signed(window));
        match cutoff {
            Some(cutoff) => interactions.retain(|i| i.created_at >= cutoff),
            None if self.window.is_some() => debug!("Trending window exceeds the time range, counting everything"),
            None => {}
        }

        let counts = tally(&interactions);
        let articles = try_join_all(
            counts
                .iter()
                .map(|(id, _)| within(self.timeout, "resolve article", self.content.get_article(id))),
        )
        .await?;

        let mut entries: Vec<TrendingEntry> = counts
            .into_iter()
            .zip(articles)
            .filter_map(|((article_id, engagement), article)| match article {
                Some(article) => Some(TrendingEntry {
                    article,
                    score: self.score(engagement),
                    reason: format!(
                        "Trending with {} and {}",
                        plural(engagement.likes, "like"),
                        plural(engagement.views, "view")
                    ),
                }),
                None => {
                    debug!("{}", Error::MissingReference { article_id });
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        entries.truncate(limit.get());
        Ok(entries)
    }
}
