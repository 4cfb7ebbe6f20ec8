use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::matching::source::{CandidateSource, ProfileProvider};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: ResponseCache,
    pub config: Config,
    /// Where the matcher reads the user's skills from. Default: `PgCatalog`.
    pub profiles: Arc<dyn ProfileProvider>,
    /// Where the matcher reads jobs and resources from. Default: `PgCatalog`.
    pub candidates: Arc<dyn CandidateSource>,
}
