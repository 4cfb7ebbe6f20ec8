use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::ranker::MatchCandidate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub is_remote: bool,
    pub required_skills: Vec<String>,
    pub recommended_experience: Option<String>,
    pub job_type: String,
    pub description: Option<String>,
    pub posted_at: DateTime<Utc>,
}

/// The slice of a job the matcher needs: identity, display fields, skills.
#[derive(Debug, Clone, FromRow)]
pub struct JobCandidate {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub required_skills: Vec<String>,
}

impl MatchCandidate for JobCandidate {
    fn candidate_id(&self) -> Uuid {
        self.id
    }

    fn skill_names(&self) -> &[String] {
        &self.required_skills
    }
}
