pub mod backends;
pub mod snapshot;

pub use backends::*;
pub use snapshot::Snapshot;

pub mod prelude {
    pub use super::backends::*;
    pub use super::snapshot::Snapshot;
    pub use rec_core::{ContentStore, IdentityStore, InteractionLedger, InteractionStore};
}
