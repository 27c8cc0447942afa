use rec_core::{Article, Interaction, Result, User};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A full dump of the three stores, used to seed a backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Snapshot {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }
}
