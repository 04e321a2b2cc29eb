//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into the readiness handler and used to build the domain services.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the underlying connection pool across clones
    pub mongo_client: Client,
    pub db: Database,
}
