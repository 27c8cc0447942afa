pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use storage::{ContentStore, IdentityStore, InteractionLedger, InteractionStore};
pub use types::*;
