use serde::{Deserialize, Serialize};

use crate::db::contains_pattern;
use crate::fields::non_blank;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Internship")]
    Internship,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Full-time")]
    #[default]
    FullTime,
    #[serde(rename = "Freelance")]
    Freelance,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::Internship,
        JobType::PartTime,
        JobType::FullTime,
        JobType::Freelance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Internship => "Internship",
            JobType::PartTime => "Part-time",
            JobType::FullTime => "Full-time",
            JobType::Freelance => "Freelance",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(value: &str) -> Option<JobType> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

/// Raw `GET /api/jobs` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub skill: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

/// Query parameters resolved into SQL-ready predicates. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// ILIKE pattern over required skill names.
    pub skill_pattern: Option<String>,
    /// ILIKE pattern over location.
    pub location_pattern: Option<String>,
    /// `location=remote` selects remote jobs instead of matching the text.
    pub remote_only: bool,
    /// Compared case-insensitively against the stored job type.
    pub job_type: Option<String>,
}

impl From<JobListQuery> for JobFilter {
    fn from(query: JobListQuery) -> Self {
        let location = non_blank(query.location);
        let remote_only = location
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case("remote"));

        JobFilter {
            skill_pattern: non_blank(query.skill).map(|s| contains_pattern(&s)),
            location_pattern: if remote_only {
                None
            } else {
                location.map(|l| contains_pattern(&l))
            },
            remote_only,
            job_type: non_blank(query.job_type),
        }
    }
}
