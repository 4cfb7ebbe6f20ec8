use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::ranker::MatchCandidate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LearningResourceRow {
    pub id: Uuid,
    pub title: String,
    pub platform: Option<String>,
    pub url: String,
    pub related_skills: Vec<String>,
    pub cost: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResourceCandidate {
    pub id: Uuid,
    pub title: String,
    pub platform: Option<String>,
    pub related_skills: Vec<String>,
}

impl MatchCandidate for ResourceCandidate {
    fn candidate_id(&self) -> Uuid {
        self.id
    }

    fn skill_names(&self) -> &[String] {
        &self.related_skills
    }
}
