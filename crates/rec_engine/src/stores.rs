use rec_core::{ContentStore, Error, IdentityStore, InteractionStore, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// The collaborators the engine reads from.
#[derive(Clone)]
pub struct Stores {
    pub content: Arc<dyn ContentStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub interactions: Arc<dyn InteractionStore>,
}

impl Stores {
    pub fn new(
        content: Arc<dyn ContentStore>,
        identity: Arc<dyn IdentityStore>,
        interactions: Arc<dyn InteractionStore>,
    ) -> Self {
        Self {
            content,
            identity,
            interactions,
        }
    }

    /// Use one backend for all three roles.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: ContentStore + IdentityStore + InteractionStore + 'static,
    {
        Self {
            content: backend.clone(),
            identity: backend.clone(),
            interactions: backend,
        }
    }
}

/// Run a store read under a deadline. Expiry is reported as
/// `StoreUnavailable`, never as an empty result.
pub(crate) async fn within<T, F>(timeout: Duration, what: &str, read: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, read).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("⚠️ Store read failed ({}): {}", what, e);
            Err(e)
        }
        Err(_) => {
            warn!("⚠️ Store read timed out ({}) after {}ms", what, timeout.as_millis());
            Err(Error::StoreUnavailable(format!(
                "{} timed out after {}ms",
                what,
                timeout.as_millis()
            )))
        }
    }
}
