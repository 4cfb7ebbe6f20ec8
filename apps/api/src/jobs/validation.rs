use serde::Deserialize;

use crate::errors::AppError;
use crate::fields::non_blank;
use crate::jobs::filters::JobType;

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub required_skills: Option<Vec<String>>,
    pub recommended_experience: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
}

/// A validated job ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub is_remote: bool,
    pub required_skills: Vec<String>,
    pub recommended_experience: Option<String>,
    pub job_type: JobType,
    pub description: Option<String>,
}

const MAX_EXPERIENCE_LEN: usize = 10;

pub fn validate_new_job(req: CreateJobRequest) -> Result<NewJob, AppError> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let company = req.company.trim().to_string();
    if company.is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }

    let job_type = match non_blank(req.job_type) {
        None => JobType::default(),
        Some(raw) => JobType::parse(&raw).ok_or_else(|| {
            AppError::Validation(format!(
                "job_type must be one of Internship, Part-time, Full-time, Freelance (got '{raw}')"
            ))
        })?,
    };

    let recommended_experience = non_blank(req.recommended_experience);
    if recommended_experience
        .as_deref()
        .is_some_and(|e| e.chars().count() > MAX_EXPERIENCE_LEN)
    {
        return Err(AppError::Validation(format!(
            "recommended_experience must be at most {MAX_EXPERIENCE_LEN} characters"
        )));
    }

    Ok(NewJob {
        title,
        company,
        location: non_blank(req.location),
        is_remote: req.is_remote.unwrap_or(false),
        required_skills: req.required_skills.unwrap_or_default(),
        recommended_experience,
        job_type,
        description: req.description,
    })
}
