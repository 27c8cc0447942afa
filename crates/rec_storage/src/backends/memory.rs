use async_trait::async_trait;
use chrono::Utc;
use rec_core::{
    Article, ContentStore, Error, IdentityStore, Interaction, InteractionFilter, InteractionKind,
    InteractionLedger, InteractionStore, Result, User,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::Snapshot;

#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    users: Vec<User>,
    interactions: Vec<Interaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_article(&mut self, article: Article) {
        if let Some(existing) = self.articles.iter_mut().find(|a| a.id == article.id) {
            *existing = article;
        } else {
            self.articles.push(article);
        }
    }

    /// Interactions pointing at the article are left in place.
    pub fn delete_article(&mut self, id: &str) -> bool {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        self.articles.len() != before
    }

    pub fn insert_user(&mut self, user: User) -> Result<()> {
        if user.interests.len() > User::MAX_INTERESTS {
            return Err(Error::InvalidArgument(format!(
                "user {} has {} interests, at most {} allowed",
                user.username,
                user.interests.len(),
                User::MAX_INTERESTS
            )));
        }
        if self.users.iter().any(|u| u.id != user.id && u.username == user.username) {
            return Err(Error::Conflict(format!("username {} is taken", user.username)));
        }
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
            *existing = user;
        } else {
            self.users.push(user);
        }
        Ok(())
    }

    pub fn insert_interaction(&mut self, interaction: Interaction) -> Result<()> {
        if self.find_interaction(&interaction.user_id, &interaction.article_id, interaction.kind).is_some() {
            return Err(Error::Conflict(format!(
                "user {} already has a {} on article {}",
                interaction.user_id, interaction.kind, interaction.article_id
            )));
        }
        self.interactions.push(interaction);
        Ok(())
    }

    fn find_interaction(&self, user_id: &str, article_id: &str, kind: InteractionKind) -> Option<usize> {
        self.interactions
            .iter()
            .position(|i| i.user_id == user_id && i.article_id == article_id && i.kind == kind)
    }

    pub fn record(&mut self, user_id: &str, article_id: &str, kind: InteractionKind) -> Result<Interaction> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(Error::user_not_found(user_id));
        }
        if !self.articles.iter().any(|a| a.id == article_id) {
            return Err(Error::article_not_found(article_id));
        }
        let interaction = Interaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            article_id: article_id.to_string(),
            kind,
            created_at: Utc::now(),
        };
        self.insert_interaction(interaction.clone())?;
        Ok(interaction)
    }

    pub fn remove(&mut self, user_id: &str, article_id: &str, kind: InteractionKind) -> bool {
        match self.find_interaction(user_id, article_id, kind) {
            Some(index) => {
                self.interactions.remove(index);
                true
            }
            None => false,
        }
    }

    fn interactions_where<F>(&self, filter: InteractionFilter, predicate: F) -> Vec<Interaction>
    where
        F: Fn(&Interaction) -> bool,
    {
        self.interactions
            .iter()
            .filter(|i| filter.matches(i) && predicate(i))
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            articles: self.articles.clone(),
            users: self.users.clone(),
            interactions: self.interactions.clone(),
        }
    }
}

/// In-memory backend for all three stores. Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut store = MemoryStore::new();
        for article in snapshot.articles {
            store.upsert_article(article);
        }
        for user in snapshot.users {
            store.insert_user(user)?;
        }
        for interaction in snapshot.interactions {
            store.insert_interaction(interaction)?;
        }
        debug!(
            articles = store.articles.len(),
            users = store.users.len(),
            interactions = store.interactions.len(),
            "Loaded snapshot into memory storage"
        );
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    pub async fn insert_article(&self, article: Article) {
        self.store.write().await.upsert_article(article);
    }

    pub async fn delete_article(&self, id: &str) -> bool {
        self.store.write().await.delete_article(id)
    }

    pub async fn insert_user(&self, user: User) -> Result<()> {
        self.store.write().await.insert_user(user)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.store.read().await.snapshot()
    }
}

#[async_trait]
impl ContentStore for MemoryStorage {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.store.read().await.articles.clone())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.iter().find(|a| a.id == id).cloned())
    }
}

#[async_trait]
impl IdentityStore for MemoryStorage {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl InteractionStore for MemoryStorage {
    async fn list_by_user(&self, user_id: &str, filter: InteractionFilter) -> Result<Vec<Interaction>> {
        let store = self.store.read().await;
        Ok(store.interactions_where(filter, |i| i.user_id == user_id))
    }

    async fn list_by_article(&self, article_id: &str, filter: InteractionFilter) -> Result<Vec<Interaction>> {
        let store = self.store.read().await;
        Ok(store.interactions_where(filter, |i| i.article_id == article_id))
    }

    async fn list_all(&self, filter: InteractionFilter) -> Result<Vec<Interaction>> {
        let store = self.store.read().await;
        Ok(store.interactions_where(filter, |_| true))
    }

    async fn count_by_article_and_kind(&self, article_id: &str, kind: InteractionKind) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store
            .interactions
            .iter()
            .filter(|i| i.article_id == article_id && i.kind == kind)
            .count() as u64)
    }
}

#[async_trait]
impl InteractionLedger for MemoryStorage {
    async fn record(&self, user_id: &str, article_id: &str, kind: InteractionKind) -> Result<Interaction> {
        self.store.write().await.record(user_id, article_id, kind)
    }

    async fn remove(&self, user_id: &str, article_id: &str, kind: InteractionKind) -> Result<bool> {
        Ok(self.store.write().await.remove(user_id, article_id, kind))
    }
}
