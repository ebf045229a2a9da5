use serde::{Deserialize, Serialize};

/// A skill attached to a user, either offered (with a level) or needed
/// (with an optional priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTag {
    #[serde(alias = "skill")]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl SkillTag {
    /// An offered skill with a proficiency level
    pub fn offered(name: impl Into<String>, category: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            level: Some(level.into()),
            priority: None,
        }
    }

    /// A needed skill, no level
    pub fn needed(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            level: None,
            priority: None,
        }
    }
}

/// User profile hydrated with offered and needed skills
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "default_availability")]
    pub availability: String,
    #[serde(default)]
    pub skills_offered: Vec<SkillTag>,
    #[serde(default)]
    pub skills_needed: Vec<SkillTag>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// Country part of the free-text location ("City, Country")
    pub fn country(&self) -> Option<&str> {
        self.location
            .as_deref()
            .and_then(crate::core::location::country_of)
    }
}

fn default_avatar() -> String { "👤".to_string() }
fn default_availability() -> String { "Flexible".to_string() }

/// Scored match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(rename = "user")]
    pub candidate: UserProfile,
    pub score: f64,
    #[serde(rename = "interests")]
    pub reasons: Vec<String>,
}

/// Skill catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub popularity: i32,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Points per offered/needed skill pair that overlaps
    pub skill_match: f64,
    /// Bonus when both users live in the same country
    pub same_country: f64,
    /// Multiplier applied to the candidate's rating
    pub rating_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_match: 3.0,
            same_country: 1.0,
            rating_factor: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_missing_skills() {
        let json = r#"{"id": 7, "name": "Marie", "rating": 4.8, "verified": true}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert!(profile.skills_offered.is_empty());
        assert!(profile.skills_needed.is_empty());
        assert_eq!(profile.availability, "Flexible");
        assert!(profile.location.is_none());
    }

    #[test]
    fn test_skill_tag_accepts_legacy_key() {
        let json = r#"{"skill": "Guitare", "level": "Expert", "category": "Musique"}"#;
        let tag: SkillTag = serde_json::from_str(json).unwrap();

        assert_eq!(tag.name, "Guitare");
        assert_eq!(tag.level.as_deref(), Some("Expert"));
    }

    #[test]
    fn test_scored_match_wire_shape() {
        let candidate = UserProfile {
            id: 2,
            name: "Carlos".to_string(),
            avatar: "🇪🇸".to_string(),
            location: Some("Madrid, Espagne".to_string()),
            bio: None,
            rating: 4.9,
            credits: 8,
            verified: true,
            availability: "Soirées".to_string(),
            skills_offered: vec![SkillTag::offered("Guitare", "Musique", "Expert")],
            skills_needed: vec![],
            created_at: None,
        };
        let scored = ScoredMatch {
            candidate,
            score: 2.45,
            reasons: vec!["reason".to_string()],
        };

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["user"]["skillsOffered"][0]["name"], "Guitare");
        assert_eq!(value["interests"][0], "reason");
        assert!(value["user"].get("skills_offered").is_none());
    }
}
