//! Collaborators the matcher reads from. Handlers hold them as trait objects so
//! the matching pipeline never sees SQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::models::job::{JobCandidate, JobRow};
use crate::models::resource::{LearningResourceRow, ResourceCandidate};
use crate::models::user::ProfileView;
use crate::resources::store as resource_store;
use crate::users::store as user_store;

/// Supplies the user's current profile, including skill names.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Option<ProfileView>, AppError>;
}

/// Supplies candidates for ranking and the full records for presentation.
///
/// Candidates come back in a fixed order (newest first, then id) so equal
/// match keys rank deterministically.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn job_candidates(&self) -> Result<Vec<JobCandidate>, AppError>;
    async fn resource_candidates(&self) -> Result<Vec<ResourceCandidate>, AppError>;
    async fn jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<JobRow>, AppError>;
    async fn resources_by_ids(&self, ids: &[Uuid])
        -> Result<Vec<LearningResourceRow>, AppError>;
}

/// Postgres-backed implementation of both collaborators.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileProvider for PgCatalog {
    async fn profile(&self, user_id: Uuid) -> Result<Option<ProfileView>, AppError> {
        user_store::get_profile_view(&self.pool, user_id).await
    }
}

#[async_trait]
impl CandidateSource for PgCatalog {
    async fn job_candidates(&self) -> Result<Vec<JobCandidate>, AppError> {
        job_store::list_candidates(&self.pool).await
    }

    async fn resource_candidates(&self) -> Result<Vec<ResourceCandidate>, AppError> {
        resource_store::list_candidates(&self.pool).await
    }

    async fn jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<JobRow>, AppError> {
        job_store::get_jobs_by_ids(&self.pool, ids).await
    }

    async fn resources_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<LearningResourceRow>, AppError> {
        resource_store::get_resources_by_ids(&self.pool, ids).await
    }
}
