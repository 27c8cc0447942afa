use rec_core::{EngineConfig, Limit, Strategy};
use rec_engine::{RecommendationEngine, Stores};
use rec_storage::{MemoryStorage, Snapshot};
use std::path::PathBuf;
use std::sync::Arc;

async fn sample_engine() -> RecommendationEngine {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample.json");
    let snapshot = Snapshot::load(path).await.unwrap();
    let storage = Arc::new(MemoryStorage::from_snapshot(snapshot).unwrap());
    RecommendationEngine::new(Stores::from_backend(storage), EngineConfig::default())
}

#[tokio::test]
async fn test_sample_recommendations_for_alice() {
    let set = sample_engine().await.get_recommendations_for_user("u1", Limit::default()).await.unwrap();

    let ranked: Vec<_> = set
        .recommendations
        .iter()
        .map(|r| (r.article.id.as_str(), r.strategy))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("a1", Strategy::InterestBased),
            ("a2", Strategy::InterestBased),
            ("a3", Strategy::PopularityBased),
            ("a5", Strategy::PopularityBased),
        ]
    );
    assert_eq!(set.recommendations[0].score, 9.0);
    assert_eq!(set.recommendations[1].score, 1.5);
    assert!((set.recommendations[2].score - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_sample_trending() {
    let trending = sample_engine().await.get_trending_articles(Limit::new(3).unwrap()).await.unwrap();
    let ids: Vec<_> = trending.iter().map(|t| t.article.id.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a5", "a4"]);
    assert_eq!(trending[0].score, 5.0);
}
