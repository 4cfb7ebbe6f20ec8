use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::assembler::{
    assemble_jobs, assemble_resources, JobRecommendation, ResourceRecommendation,
};
use crate::matching::recommend::{match_jobs_for_user, match_resources_for_user};
use crate::matching::source::{CandidateSource, ProfileProvider};
use crate::models::user::ProfileView;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DASHBOARD_LIMIT: i64 = 5;

pub async fn load_profile(
    profiles: &dyn ProfileProvider,
    user_id: Uuid,
) -> Result<ProfileView, AppError> {
    profiles
        .profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))
}

/// Ranks every job against `skills` and joins the top `limit` with full records.
pub async fn recommend_jobs(
    source: &dyn CandidateSource,
    skills: &[String],
    limit: i64,
) -> Result<Vec<JobRecommendation>, AppError> {
    let candidates = source.job_candidates().await?;
    let matches = match_jobs_for_user(skills, &candidates, limit);
    debug!(
        "Ranked {} job candidates, returning {}",
        candidates.len(),
        matches.len()
    );

    if matches.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = matches.iter().map(|m| m.job_id).collect();
    let records = source.jobs_by_ids(&ids).await?;
    assemble_jobs(matches, records)
}

/// Ranks every learning resource against `skills` and joins the top `limit`.
pub async fn recommend_resources(
    source: &dyn CandidateSource,
    skills: &[String],
    limit: i64,
) -> Result<Vec<ResourceRecommendation>, AppError> {
    let candidates = source.resource_candidates().await?;
    let matches = match_resources_for_user(skills, &candidates, limit);
    debug!(
        "Ranked {} resource candidates, returning {}",
        candidates.len(),
        matches.len()
    );

    if matches.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = matches.iter().map(|m| m.resource_id).collect();
    let records = source.resources_by_ids(&ids).await?;
    assemble_resources(matches, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::fakes::InMemoryCatalog;
    use crate::models::job::JobRow;
    use chrono::{Duration, Utc};

    fn job(title: &str, skills: &[&str], age_days: i64) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Tech Corp".to_string(),
            location: Some("Dhaka".to_string()),
            is_remote: false,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            recommended_experience: None,
            job_type: "Full-time".to_string(),
            description: None,
            posted_at: Utc::now() - Duration::days(age_days),
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_recommend_jobs_joins_in_rank_order() {
        let catalog = InMemoryCatalog {
            jobs: vec![
                job("Frontend Developer", &["JavaScript", "React"], 1),
                job("Python Developer", &["Python"], 2),
                job("Django Developer", &["Python", "Django", "SQL"], 3),
            ],
            ..Default::default()
        };

        let recs = recommend_jobs(&catalog, &skills(&["python", "django", "sql"]), 10)
            .await
            .unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Django Developer", "Python Developer", "Frontend Developer"]
        );
        assert_eq!(recs[0].matching_skills, vec!["Python", "Django", "SQL"]);
        assert_eq!(recs[2].match_score, 0.0);
    }

    #[tokio::test]
    async fn test_recommend_jobs_zero_limit_skips_fetch() {
        let catalog = InMemoryCatalog {
            jobs: vec![job("Python Developer", &["Python"], 1)],
            ..Default::default()
        };
        let recs = recommend_jobs(&catalog, &skills(&["python"]), 0).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_resources_empty_catalog() {
        let catalog = InMemoryCatalog::default();
        let recs = recommend_resources(&catalog, &skills(&["python"]), 5)
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_load_profile_missing_is_not_found() {
        let catalog = InMemoryCatalog::default();
        let err = load_profile(&catalog, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
