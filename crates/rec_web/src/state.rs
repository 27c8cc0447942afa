use rec_core::InteractionLedger;
use rec_engine::RecommendationEngine;
use std::sync::Arc;

pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub ledger: Arc<dyn InteractionLedger>,
}

impl AppState {
    pub fn new(engine: Arc<RecommendationEngine>, ledger: Arc<dyn InteractionLedger>) -> Self {
        Self { engine, ledger }
    }
}
