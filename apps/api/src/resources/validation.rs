use serde::Deserialize;

use crate::errors::AppError;
use crate::fields::{is_http_url, non_blank};
use crate::resources::filters::Cost;

const MAX_URL_LEN: usize = 1024;

/// Body of `POST /api/resources`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResourceRequest {
    pub title: String,
    pub platform: Option<String>,
    pub url: String,
    pub related_skills: Option<Vec<String>>,
    pub cost: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub title: String,
    pub platform: Option<String>,
    pub url: String,
    pub related_skills: Vec<String>,
    pub cost: Cost,
    pub description: Option<String>,
}

pub fn validate_new_resource(req: CreateResourceRequest) -> Result<NewResource, AppError> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let url = req.url.trim().to_string();
    if !is_http_url(&url) {
        return Err(AppError::Validation(format!("'{url}' is not a valid URL")));
    }
    if url.len() > MAX_URL_LEN {
        return Err(AppError::Validation(format!(
            "url must be at most {MAX_URL_LEN} characters"
        )));
    }

    let cost = match non_blank(req.cost) {
        None => Cost::default(),
        Some(raw) => Cost::parse(&raw).ok_or_else(|| {
            AppError::Validation(format!("cost must be Free or Paid (got '{raw}')"))
        })?,
    };

    Ok(NewResource {
        title,
        platform: non_blank(req.platform),
        url,
        related_skills: req.related_skills.unwrap_or_default(),
        cost,
        description: req.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateResourceRequest {
        CreateResourceRequest {
            title: "Django Tutorial".into(),
            url: "https://example.com/django".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cost_defaults_to_free() {
        let r = validate_new_resource(request()).unwrap();
        assert_eq!(r.cost, Cost::Free);
        assert_eq!(r.platform, None);
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let err = validate_new_resource(CreateResourceRequest {
            cost: Some("Cheap".into()),
            ..request()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_url_must_be_http() {
        for bad in ["example.com", "ftp://example.com", "https://", "https://a b.com"] {
            let err = validate_new_resource(CreateResourceRequest {
                url: bad.into(),
                ..request()
            });
            assert!(err.is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_malformed_host_rejected() {
        for bad in ["https://[", "http://exa<mple>.com", "https://:::", "http://:80/x"] {
            let result = validate_new_resource(CreateResourceRequest {
                url: bad.into(),
                ..request()
            });
            assert!(result.is_err(), "accepted malformed url {bad:?}");
        }
    }

    #[test]
    fn test_url_with_path_and_query_accepted() {
        let r = validate_new_resource(CreateResourceRequest {
            url: "https://www.youtube.com/watch?v=abc123#t=10".into(),
            ..request()
        })
        .unwrap();
        assert_eq!(r.url, "https://www.youtube.com/watch?v=abc123#t=10");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(validate_new_resource(CreateResourceRequest {
            title: "".into(),
            ..request()
        })
        .is_err());
    }
}
