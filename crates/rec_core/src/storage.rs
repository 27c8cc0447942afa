use async_trait::async_trait;
use crate::types::{Article, Interaction, InteractionFilter, InteractionKind, User};
use crate::Result;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List every article, in insertion order
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Get a single article, `None` if it does not exist
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn list_by_user(&self, user_id: &str, filter: InteractionFilter) -> Result<Vec<Interaction>>;

    async fn list_by_article(&self, article_id: &str, filter: InteractionFilter) -> Result<Vec<Interaction>>;

    async fn list_all(&self, filter: InteractionFilter) -> Result<Vec<Interaction>>;

    async fn count_by_article_and_kind(&self, article_id: &str, kind: InteractionKind) -> Result<u64>;
}

/// Write side of the interaction store.
///
/// Implementations must keep at most one interaction per
/// (user, article, kind) triple and report a second one as `Error::Conflict`.
#[async_trait]
pub trait InteractionLedger: Send + Sync {
    async fn record(&self, user_id: &str, article_id: &str, kind: InteractionKind) -> Result<Interaction>;

    /// Returns `false` when there was nothing to remove
    async fn remove(&self, user_id: &str, article_id: &str, kind: InteractionKind) -> Result<bool>;
}
