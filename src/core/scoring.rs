use crate::models::{UserProfile, ScoringWeights};
use crate::core::{filters::overlapping_pairs, location::same_country};

/// Calculate the match score of a candidate for a requester
///
/// Scoring formula:
/// score = (
///     skill_match * pairs_taught +     # requester offers, candidate needs
///     skill_match * pairs_learned +    # candidate offers, requester needs
///     same_country * shared_country +  # 1 when both countries are equal
///     rating_factor * candidate.rating
/// )
///
/// Returns the score and one reason per overlapping skill pair.
pub fn calculate_match_score(
    requester: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    // Requester teaches, candidate learns
    for (offered, needed) in overlapping_pairs(&requester.skills_offered, &candidate.skills_needed) {
        score += weights.skill_match;
        reasons.push(format!(
            "You teach {} → {} wants {}",
            offered.name, candidate.name, needed.name
        ));
    }

    // Candidate teaches, requester learns
    for (offered, needed) in overlapping_pairs(&candidate.skills_offered, &requester.skills_needed) {
        score += weights.skill_match;
        reasons.push(format!(
            "{} teaches {} → you want {}",
            candidate.name, offered.name, needed.name
        ));
    }

    if same_country(requester.location.as_deref(), candidate.location.as_deref()) {
        score += weights.same_country;
    }

    score += candidate.rating * weights.rating_factor;

    (score, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillTag;

    fn create_test_profile(id: i64, location: &str, rating: f64) -> UserProfile {
        UserProfile {
            id,
            name: format!("User {}", id),
            avatar: "👤".to_string(),
            location: Some(location.to_string()),
            bio: None,
            rating,
            credits: 5,
            verified: true,
            availability: "Flexible".to_string(),
            skills_offered: vec![],
            skills_needed: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_mutual_exchange_score() {
        let mut requester = create_test_profile(1, "Paris, France", 4.8);
        requester.skills_offered = vec![SkillTag::offered("Français", "Langues", "Natif")];
        requester.skills_needed = vec![SkillTag::needed("Guitare", "Musique")];

        let mut candidate = create_test_profile(2, "Madrid, Espagne", 4.9);
        candidate.name = "Carlos".to_string();
        candidate.skills_offered = vec![SkillTag::offered("Guitare", "Musique", "Expert")];
        candidate.skills_needed = vec![SkillTag::needed("Français", "Langues")];

        let (score, reasons) = calculate_match_score(&requester, &candidate, &ScoringWeights::default());

        assert!((score - 8.45).abs() < 1e-9, "got {}", score);
        assert_eq!(reasons, vec![
            "You teach Français → Carlos wants Français".to_string(),
            "Carlos teaches Guitare → you want Guitare".to_string(),
        ]);
    }

    #[test]
    fn test_pair_contribution_is_symmetric() {
        let weights = ScoringWeights::default();

        let mut tutor = create_test_profile(1, "Paris", 0.0);
        tutor.skills_offered = vec![SkillTag::offered("Guitare", "Musique", "Expert")];
        let mut learner = create_test_profile(2, "Lyon", 0.0);
        learner.skills_needed = vec![SkillTag::needed("Guitare", "Musique")];

        let (forward, _) = calculate_match_score(&tutor, &learner, &weights);
        let (mirrored, _) = calculate_match_score(&learner, &tutor, &weights);

        assert_eq!(forward, 3.0);
        assert_eq!(mirrored, 3.0);
    }

    #[test]
    fn test_country_bonus() {
        let weights = ScoringWeights::default();
        let paris = create_test_profile(1, "Paris, France", 0.0);
        let lyon = create_test_profile(2, "Lyon, France", 0.0);
        let madrid = create_test_profile(3, "Madrid, Espagne", 0.0);

        assert_eq!(calculate_match_score(&paris, &lyon, &weights).0, 1.0);
        assert_eq!(calculate_match_score(&paris, &madrid, &weights).0, 0.0);
    }

    #[test]
    fn test_rating_only_score() {
        let requester = create_test_profile(1, "Paris, France", 4.8);
        let candidate = create_test_profile(2, "Tokyo, Japon", 4.0);

        let (score, reasons) = calculate_match_score(&requester, &candidate, &ScoringWeights::default());

        assert_eq!(score, 2.0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            skill_match: 5.0,
            same_country: 2.0,
            rating_factor: 1.0,
        };
        let mut requester = create_test_profile(1, "Paris, France", 0.0);
        requester.skills_offered = vec![SkillTag::offered("Piano", "Musique", "Expert")];
        let mut candidate = create_test_profile(2, "Lyon, France", 3.0);
        candidate.skills_needed = vec![SkillTag::needed("piano", "Musique")];

        let (score, _) = calculate_match_score(&requester, &candidate, &weights);

        assert_eq!(score, 10.0);
    }
}
