use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::project::ProjectRow;

/// A user joined with their profile, skills, careers and projects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileView {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub username: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub preferred_careers: Vec<String>,
    pub cv_text: Option<String>,
    /// Career titles suggested for the user, distinct from the ones they prefer.
    pub suggested_roles: Vec<String>,
    /// Newest first.
    pub projects: Json<Vec<ProjectRow>>,
}
