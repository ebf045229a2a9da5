use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for browsing other users
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrowseUsersQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub search: Option<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Query parameters for the skill catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Body of `PUT /api/users/me`
///
/// `bio` and `location` are replaced as given (absent clears them).
/// `availability` and `avatar` keep their stored value when absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub availability: Option<String>,
    #[validate(length(min = 1, max = 10))]
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Body of `POST /api/users/skills`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddOfferedSkillRequest {
    #[validate(range(min = 1))]
    pub skill_id: i64,
    #[validate(length(min = 1, max = 20))]
    pub level: String,
    #[validate(range(min = 0, max = 80))]
    #[serde(default)]
    pub experience_years: i32,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/users/needs`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNeededSkillRequest {
    #[validate(range(min = 1))]
    pub skill_id: i64,
    #[validate(length(min = 1, max = 20))]
    #[serde(default = "default_priority")]
    pub priority: String,
    #[validate(range(min = 0, max = 100))]
    #[serde(default = "default_max_credits_per_hour")]
    pub max_credits_per_hour: i32,
    #[validate(length(min = 1, max = 20))]
    #[serde(default = "default_preferred_level")]
    pub preferred_level: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_priority() -> String { "Moyenne".to_string() }
fn default_max_credits_per_hour() -> i32 { 2 }
fn default_preferred_level() -> String { "Intermédiaire".to_string() }
