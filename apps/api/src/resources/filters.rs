use serde::{Deserialize, Serialize};

use crate::db::contains_pattern;
use crate::fields::non_blank;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cost {
    #[default]
    Free,
    Paid,
}

impl Cost {
    pub fn as_str(self) -> &'static str {
        match self {
            Cost::Free => "Free",
            Cost::Paid => "Paid",
        }
    }

    pub fn parse(value: &str) -> Option<Cost> {
        [Cost::Free, Cost::Paid]
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Raw `GET /api/resources` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceListQuery {
    pub skill: Option<String>,
    pub cost: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub skill_pattern: Option<String>,
    /// Compared case-insensitively against the stored cost.
    pub cost: Option<String>,
    pub platform_pattern: Option<String>,
}

impl ResourceFilter {
    /// Key parts for the response cache; stable for equal filters.
    pub fn cache_parts(&self) -> [Option<&str>; 3] {
        [
            self.skill_pattern.as_deref(),
            self.cost.as_deref(),
            self.platform_pattern.as_deref(),
        ]
    }
}

impl From<ResourceListQuery> for ResourceFilter {
    fn from(query: ResourceListQuery) -> Self {
        ResourceFilter {
            skill_pattern: non_blank(query.skill).map(|s| contains_pattern(&s)),
            cost: non_blank(query.cost),
            platform_pattern: non_blank(query.platform).map(|p| contains_pattern(&p)),
        }
    }
}
