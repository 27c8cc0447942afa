use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rec_core::{Error, InteractionKind, Limit, RecommendationSet, TrendingEntry};
use rec_engine::AlgorithmInfo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    fn limit(&self) -> rec_core::Result<Limit> {
        self.limit.map_or(Ok(Limit::default()), Limit::new)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub articles: Vec<TrendingEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRequest {
    pub user_id: String,
    pub article_id: String,
    pub kind: InteractionKind,
}

pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<RecommendationSet>> {
    let limit = query.limit()?;
    let set = state.engine.get_recommendations_for_user(&user_id, limit).await?;
    Ok(Json(set))
}

pub async fn get_trending(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<TrendingResponse>> {
    let limit = query.limit()?;
    let articles = state.engine.get_trending_articles(limit).await?;
    Ok(Json(TrendingResponse {
        total: articles.len(),
        articles,
    }))
}

pub async fn get_algorithm_info(State(state): State<Arc<AppState>>) -> Json<AlgorithmInfo> {
    Json(state.engine.algorithm_info())
}

pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InteractionRequest>,
) -> ApiResult<impl IntoResponse> {
    let interaction = state
        .ledger
        .record(&request.user_id, &request.article_id, request.kind)
        .await?;
    info!(
        user_id = %interaction.user_id,
        article_id = %interaction.article_id,
        kind = %interaction.kind,
        "📝 Recorded interaction"
    );
    Ok((StatusCode::CREATED, Json(interaction)))
}

pub async fn remove_interaction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InteractionRequest>,
) -> ApiResult<StatusCode> {
    let removed = state
        .ledger
        .remove(&request.user_id, &request.article_id, request.kind)
        .await?;
    if !removed {
        return Err(Error::NotFound {
            entity: "Interaction",
            id: format!("{}/{}/{}", request.user_id, request.article_id, request.kind),
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> &'static str {
    "ok"
}
