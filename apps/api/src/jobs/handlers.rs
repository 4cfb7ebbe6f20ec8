//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filters::{JobFilter, JobListQuery};
use crate::jobs::store;
use crate::jobs::validation::{validate_new_job, CreateJobRequest};
use crate::models::job::JobRow;
use crate::state::AppState;

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let filter = JobFilter::from(query);
    let jobs = store::list_jobs(&state.db, &filter).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = store::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let new_job = validate_new_job(request)?;
    let job = store::create_job(&state.db, new_job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}
