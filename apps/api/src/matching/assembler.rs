//! Joins ranked matches back to full records for presentation.
//! Output order is exactly the ranked order; nothing is re-sorted or dropped.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::recommend::{JobMatch, ResourceMatch};
use crate::models::job::JobRow;
use crate::models::resource::LearningResourceRow;

#[derive(Debug, Clone, Serialize)]
pub struct JobRecommendation {
    pub job: JobRow,
    pub match_score: f64,
    pub matching_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecommendation {
    pub resource: LearningResourceRow,
    pub match_score: f64,
    pub matching_skills: Vec<String>,
}

pub fn assemble_jobs(
    matches: Vec<JobMatch>,
    records: Vec<JobRow>,
) -> Result<Vec<JobRecommendation>, AppError> {
    join_in_rank_order(
        matches,
        records,
        |m| m.job_id,
        |r| r.id,
        "Job",
        |m, job| JobRecommendation {
            job,
            match_score: m.match_score,
            matching_skills: m.matching_skills,
        },
    )
}

pub fn assemble_resources(
    matches: Vec<ResourceMatch>,
    records: Vec<LearningResourceRow>,
) -> Result<Vec<ResourceRecommendation>, AppError> {
    join_in_rank_order(
        matches,
        records,
        |m| m.resource_id,
        |r| r.id,
        "Resource",
        |m, resource| ResourceRecommendation {
            resource,
            match_score: m.match_score,
            matching_skills: m.matching_skills,
        },
    )
}

/// A match whose record vanished between ranking and fetching is reported as
/// `NotFound` rather than silently skipped.
fn join_in_rank_order<M, D, R>(
    matches: Vec<M>,
    records: Vec<D>,
    match_id: impl Fn(&M) -> Uuid,
    record_id: impl Fn(&D) -> Uuid,
    kind: &str,
    build: impl Fn(M, D) -> R,
) -> Result<Vec<R>, AppError> {
    let mut by_id: HashMap<Uuid, D> = records.into_iter().map(|r| (record_id(&r), r)).collect();

    matches
        .into_iter()
        .map(|m| {
            let id = match_id(&m);
            let record = by_id
                .remove(&id)
                .ok_or_else(|| AppError::NotFound(format!("{kind} {id} not found")))?;
            Ok(build(m, record))
        })
        .collect()
}
