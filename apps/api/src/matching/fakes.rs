//! In-memory collaborators for handler tests.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::source::{CandidateSource, ProfileProvider};
use crate::models::job::{JobCandidate, JobRow};
use crate::models::resource::{LearningResourceRow, ResourceCandidate};
use crate::models::user::ProfileView;

#[derive(Default)]
pub struct InMemoryCatalog {
    pub profiles: HashMap<Uuid, ProfileView>,
    pub jobs: Vec<JobRow>,
    pub resources: Vec<LearningResourceRow>,
}

#[async_trait]
impl ProfileProvider for InMemoryCatalog {
    async fn profile(&self, user_id: Uuid) -> Result<Option<ProfileView>, AppError> {
        Ok(self.profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl CandidateSource for InMemoryCatalog {
    async fn job_candidates(&self) -> Result<Vec<JobCandidate>, AppError> {
        Ok(self
            .jobs
            .iter()
            .map(|j| JobCandidate {
                id: j.id,
                title: j.title.clone(),
                company: j.company.clone(),
                required_skills: j.required_skills.clone(),
            })
            .collect())
    }

    async fn resource_candidates(&self) -> Result<Vec<ResourceCandidate>, AppError> {
        Ok(self
            .resources
            .iter()
            .map(|r| ResourceCandidate {
                id: r.id,
                title: r.title.clone(),
                platform: r.platform.clone(),
                related_skills: r.related_skills.clone(),
            })
            .collect())
    }

    async fn jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<JobRow>, AppError> {
        Ok(self
            .jobs
            .iter()
            .filter(|j| ids.contains(&j.id))
            .cloned()
            .collect())
    }

    async fn resources_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<LearningResourceRow>, AppError> {
        Ok(self
            .resources
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}
