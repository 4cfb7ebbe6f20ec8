//! Axum route handlers for personalised matching and the dashboard.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::assembler::{JobRecommendation, ResourceRecommendation};
use crate::matching::service::{
    load_profile, recommend_jobs, recommend_resources, DASHBOARD_LIMIT, DEFAULT_LIMIT,
};
use crate::models::user::ProfileView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub profile: ProfileView,
    pub recommended_jobs: Vec<JobRecommendation>,
    pub recommended_resources: Vec<ResourceRecommendation>,
}

/// GET /api/matching/jobs
pub async fn handle_matching_jobs(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<JobRecommendation>>, AppError> {
    let profile = load_profile(state.profiles.as_ref(), user.user_id).await?;
    let recs = recommend_jobs(state.candidates.as_ref(), &profile.skills, params.limit).await?;
    Ok(Json(recs))
}

/// GET /api/matching/resources
pub async fn handle_matching_resources(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<ResourceRecommendation>>, AppError> {
    let profile = load_profile(state.profiles.as_ref(), user.user_id).await?;
    let recs =
        recommend_resources(state.candidates.as_ref(), &profile.skills, params.limit).await?;
    Ok(Json(recs))
}

/// GET /api/dashboard
///
/// Profile plus the top five jobs and resources for it.
pub async fn handle_dashboard(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let profile = load_profile(state.profiles.as_ref(), user.user_id).await?;
    let recommended_jobs =
        recommend_jobs(state.candidates.as_ref(), &profile.skills, DASHBOARD_LIMIT).await?;
    let recommended_resources =
        recommend_resources(state.candidates.as_ref(), &profile.skills, DASHBOARD_LIMIT).await?;

    Ok(Json(DashboardResponse {
        profile,
        recommended_jobs,
        recommended_resources,
    }))
}
