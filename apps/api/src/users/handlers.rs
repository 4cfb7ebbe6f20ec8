//! Axum route handlers for registration, profiles, profile skills and projects.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::models::user::ProfileView;
use crate::state::AppState;
use crate::users::store;
use crate::users::validation::{
    normalize_role_titles, validate_new_project, validate_profile_update, validate_registration,
    validate_username, CreateProjectRequest, RegisterRequest, UpdateProfileRequest,
};

/// What anyone may see about a user.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub fullname: String,
    pub username: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub preferred_careers: Vec<String>,
    pub projects: Vec<ProjectRow>,
}

impl From<ProfileView> for PublicUser {
    fn from(p: ProfileView) -> Self {
        PublicUser {
            id: p.id,
            fullname: p.fullname,
            username: p.username,
            education: p.education,
            experience: p.experience,
            skills: p.skills,
            preferred_careers: p.preferred_careers,
            projects: p.projects.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveSkillQuery {
    pub skill_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectIdQuery {
    pub id: Uuid,
}

/// POST /api/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileView>), AppError> {
    let new_user = validate_registration(request)?;
    let profile = store::register_user(&state.db, new_user).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/users/:username
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicUser>, AppError> {
    let profile = store::get_profile_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))?;
    Ok(Json(profile.into()))
}

/// GET /api/is_available/:username
pub async fn handle_username_available(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let taken = store::username_exists(&state.db, username.trim()).await?;
    Ok(Json(AvailabilityResponse { available: !taken }))
}

/// POST /api/set_username/:new_username
pub async fn handle_set_username(
    user: AuthUser,
    State(state): State<AppState>,
    Path(new_username): Path<String>,
) -> Result<Json<ProfileView>, AppError> {
    let username = validate_username(&new_username)?;
    let profile = store::set_username(&state.db, user.user_id, &username).await?;
    Ok(Json(profile))
}

/// GET /api/profile
pub async fn handle_get_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileView>, AppError> {
    let profile = store::get_profile_view(&state.db, user.user_id)
        .await?
        .ok_or_else(|| store::profile_not_found(user.user_id))?;
    Ok(Json(profile))
}

/// POST /api/profile
pub async fn handle_update_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, AppError> {
    let update = validate_profile_update(request)?;
    let profile = store::update_profile(&state.db, user.user_id, update).await?;
    Ok(Json(profile))
}

/// GET /api/skills
pub async fn handle_list_skills(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SkillListResponse>, AppError> {
    let skills = store::list_skill_names(&state.db, user.user_id).await?;
    Ok(Json(SkillListResponse { skills }))
}

/// POST /api/skills
///
/// Body is a JSON array of skill names.
pub async fn handle_add_skills(
    user: AuthUser,
    State(state): State<AppState>,
    Json(names): Json<Vec<String>>,
) -> Result<Json<Value>, AppError> {
    if names.iter().all(|n| n.trim().is_empty()) {
        return Err(AppError::Validation(
            "at least one skill name is required".to_string(),
        ));
    }
    store::add_skills(&state.db, user.user_id, &names).await?;
    Ok(Json(json!({ "message": "Skill(s) added successfully" })))
}

/// DELETE /api/skills?skill_name=
pub async fn handle_remove_skill(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RemoveSkillQuery>,
) -> Result<Json<Value>, AppError> {
    store::remove_skill(&state.db, user.user_id, params.skill_name.trim()).await?;
    Ok(Json(json!({ "message": "Skill removed successfully" })))
}

/// POST /api/suggested_roles
///
/// Body is a JSON array of career titles.
pub async fn handle_add_suggested_roles(
    user: AuthUser,
    State(state): State<AppState>,
    Json(titles): Json<Vec<String>>,
) -> Result<Json<Value>, AppError> {
    let roles = normalize_role_titles(&titles)?;
    store::add_suggested_roles(&state.db, user.user_id, &roles).await?;
    Ok(Json(json!({ "message": "Suggested role(s) added successfully" })))
}

/// POST /api/add_project
pub async fn handle_add_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    let project = validate_new_project(request)?;
    let row = store::create_project(&state.db, user.user_id, project).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/delete_project?id=
pub async fn handle_delete_project(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectIdQuery>,
) -> Result<Json<Value>, AppError> {
    store::delete_project(&state.db, user.user_id, params.id).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}
