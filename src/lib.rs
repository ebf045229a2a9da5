//! SkillSwap - match service for the SkillSwap skill-bartering app
//!
//! Users list skills they teach and skills they want to learn. This crate
//! ranks other verified users by mutual skill overlap, shared country and
//! reputation, and serves the result over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, calculate_match_score, country_of};
pub use crate::models::{UserProfile, SkillTag, ScoredMatch, ScoringWeights, MatchesResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.limit(), 10);
        assert_eq!(country_of("Tokyo, Japon"), Some("Japon"));
    }
}
