use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::errors::AppError;
use crate::fields::{is_http_url, non_blank};

const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("HS", "High School"),
    ("CL", "College"),
    ("BA", "Bachelors"),
    ("MA", "Masters"),
    ("PhD", "Doctorate"),
];

const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("IN", "Intern"),
    ("JR", "Junior"),
    ("MD", "Mid"),
    ("SR", "Senior"),
    ("LD", "Lead"),
];

const MAX_USERNAME_LEN: usize = 150;
const MAX_FULLNAME_LEN: usize = 255;
const MAX_PROJECT_TITLE_LEN: usize = 255;
const MAX_LINK_LEN: usize = 1024;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("static regex"))
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
}

pub fn validate_registration(req: RegisterRequest) -> Result<NewUser, AppError> {
    let fullname = validate_fullname(&req.fullname)?;
    let email = req.email.trim();
    if !email_re().is_match(email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    Ok(NewUser {
        fullname,
        email: normalize_email(email),
    })
}

/// Lower-cases the domain only; the local part is case-sensitive.
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn validate_fullname(raw: &str) -> Result<String, AppError> {
    let fullname = raw.trim();
    if fullname.is_empty() {
        return Err(AppError::Validation("fullname is required".to_string()));
    }
    if fullname.chars().count() > MAX_FULLNAME_LEN {
        return Err(AppError::Validation(format!(
            "fullname must be at most {MAX_FULLNAME_LEN} characters"
        )));
    }
    Ok(fullname.to_string())
}

pub fn validate_username(raw: &str) -> Result<String, AppError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(
            "username cannot contain whitespace".to_string(),
        ));
    }
    Ok(username.to_string())
}

/// Body of `POST /api/profile`. Absent fields are left unchanged; `skills`
/// and `preferred_careers` replace the whole list when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub fullname: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub cv_text: Option<String>,
    pub skills: Option<Vec<String>>,
    pub preferred_careers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub fullname: Option<String>,
    /// Stored choice code, e.g. `"BA"`.
    pub education: Option<String>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub cv_text: Option<String>,
    pub skills: Option<Vec<String>>,
    pub preferred_careers: Option<Vec<String>>,
}

pub fn validate_profile_update(req: UpdateProfileRequest) -> Result<ProfileUpdate, AppError> {
    let fullname = req.fullname.as_deref().map(validate_fullname).transpose()?;
    let education = non_blank(req.education)
        .map(|v| choice_code(EDUCATION_LEVELS, &v, "education"))
        .transpose()?;
    let experience = non_blank(req.experience)
        .map(|v| choice_code(EXPERIENCE_LEVELS, &v, "experience"))
        .transpose()?;

    Ok(ProfileUpdate {
        fullname,
        education,
        experience,
        bio: req.bio,
        cv_text: req.cv_text,
        skills: req.skills,
        preferred_careers: req.preferred_careers.map(|titles| {
            titles
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        }),
    })
}

/// Body of `POST /api/add_project`. Image uploads are not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

pub fn validate_new_project(req: CreateProjectRequest) -> Result<NewProject, AppError> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_PROJECT_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "title must be at most {MAX_PROJECT_TITLE_LEN} characters"
        )));
    }

    let link = non_blank(req.link);
    if let Some(link) = &link {
        if !is_http_url(link) {
            return Err(AppError::Validation(format!("'{link}' is not a valid URL")));
        }
        if link.len() > MAX_LINK_LEN {
            return Err(AppError::Validation(format!(
                "link must be at most {MAX_LINK_LEN} characters"
            )));
        }
    }

    Ok(NewProject {
        title,
        description: non_blank(req.description),
        link,
    })
}

/// Trims and capitalises role titles (`"data ENGINEER"` → `"Data engineer"`),
/// dropping blanks and repeats. Errors when nothing usable remains.
pub fn normalize_role_titles(titles: &[String]) -> Result<Vec<String>, AppError> {
    let mut roles: Vec<String> = Vec::with_capacity(titles.len());
    for title in titles {
        let title = title.trim();
        if title.is_empty() {
            continue;
        }
        let title = capitalize(title);
        if !roles.contains(&title) {
            roles.push(title);
        }
    }
    if roles.is_empty() {
        return Err(AppError::Validation(
            "at least one role title is required".to_string(),
        ));
    }
    Ok(roles)
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Accepts either the code or the label, case-insensitively, and returns the code.
fn choice_code(choices: &[(&str, &str)], value: &str, field: &str) -> Result<String, AppError> {
    choices
        .iter()
        .find(|(code, label)| code.eq_ignore_ascii_case(value) || label.eq_ignore_ascii_case(value))
        .map(|(code, _)| code.to_string())
        .ok_or_else(|| {
            let codes: Vec<&str> = choices.iter().map(|(code, _)| *code).collect();
            AppError::Validation(format!(
                "{field} must be one of {} (got '{value}')",
                codes.join(", ")
            ))
        })
}
