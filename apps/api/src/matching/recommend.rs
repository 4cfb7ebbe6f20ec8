//! Job- and resource-flavoured entry points over the generic ranker.

use serde::Serialize;
use uuid::Uuid;

use crate::matching::normalize::normalize_skills;
use crate::matching::ranker::{rank_candidates, MatchResult};
use crate::models::job::JobCandidate;
use crate::models::resource::ResourceCandidate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub match_score: f64,
    pub matching_skills: Vec<String>,
    pub total_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMatch {
    pub resource_id: Uuid,
    pub title: String,
    pub platform: String,
    pub match_score: f64,
    pub matching_skills: Vec<String>,
    pub total_skills: usize,
}

/// Ranks jobs by how many of their required skills the user holds.
pub fn match_jobs_for_user<S: AsRef<str>>(
    user_skill_names: &[S],
    jobs: &[JobCandidate],
    limit: i64,
) -> Vec<JobMatch> {
    let user_skills = normalize_skills(user_skill_names);
    rank_candidates(&user_skills, jobs, limit)
        .into_iter()
        .map(|(job, result)| {
            let MatchResult {
                candidate_id,
                score,
                matching_skills,
                total_skills,
            } = result;
            JobMatch {
                job_id: candidate_id,
                title: job.title.clone(),
                company: job.company.clone(),
                match_score: score,
                matching_skills,
                total_skills,
            }
        })
        .collect()
}

/// Ranks learning resources by how many of their related skills the user holds.
pub fn match_resources_for_user<S: AsRef<str>>(
    user_skill_names: &[S],
    resources: &[ResourceCandidate],
    limit: i64,
) -> Vec<ResourceMatch> {
    let user_skills = normalize_skills(user_skill_names);
    rank_candidates(&user_skills, resources, limit)
        .into_iter()
        .map(|(resource, result)| {
            ResourceMatch {
                resource_id: result.candidate_id,
                title: resource.title.clone(),
                platform: resource.platform.clone().unwrap_or_default(),
                match_score: result.score,
                matching_skills: result.matching_skills,
                total_skills: result.total_skills,
            }
        })
        .collect()
}
