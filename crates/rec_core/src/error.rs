use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Article {article_id} is referenced but could not be resolved")]
    MissingReference { article_id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { entity: "User", id: id.into() }
    }

    pub fn article_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { entity: "Article", id: id.into() }
    }

    /// Only a failed store read is worth retrying; everything else is a
    /// property of the request or the data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
