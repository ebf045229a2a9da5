use crate::models::{SkillTag, UserProfile};

/// Check if a candidate may appear in the requester's matches
///
/// Only verified users other than the requester qualify.
#[inline]
pub fn is_eligible_candidate(candidate: &UserProfile, requester: &UserProfile) -> bool {
    candidate.verified && candidate.id != requester.id
}

/// Case-insensitive substring containment between two skill names, in
/// either direction
///
/// Names are compared as stored, without trimming. An empty name is
/// contained in every name.
#[inline]
pub fn skill_names_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    a.contains(&b) || b.contains(&a)
}

/// Every (offered, needed) pair whose names overlap, in input order
pub fn overlapping_pairs<'a>(
    offered: &'a [SkillTag],
    needed: &'a [SkillTag],
) -> impl Iterator<Item = (&'a SkillTag, &'a SkillTag)> + 'a {
    offered.iter().flat_map(move |o| {
        needed
            .iter()
            .filter(move |n| skill_names_overlap(&o.name, &n.name))
            .map(move |n| (o, n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: i64, verified: bool) -> UserProfile {
        UserProfile {
            id,
            name: format!("User {}", id),
            avatar: "👤".to_string(),
            location: None,
            bio: None,
            rating: 0.0,
            credits: 5,
            verified,
            availability: "Flexible".to_string(),
            skills_offered: vec![],
            skills_needed: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_overlap_is_case_insensitive() {
        assert!(skill_names_overlap("Guitare", "guitare"));
        assert!(skill_names_overlap("FRANÇAIS", "français"));
    }

    #[test]
    fn test_overlap_either_direction() {
        assert!(skill_names_overlap("Guitare classique", "Guitare"));
        assert!(skill_names_overlap("Guitare", "Guitare classique"));
    }

    #[test]
    fn test_overlap_is_plain_containment() {
        assert!(skill_names_overlap("Cuisine italienne", "Italien"));
        assert!(!skill_names_overlap("Piano", "Guitare"));
        assert!(!skill_names_overlap("Anglais", "English"));
    }

    #[test]
    fn test_names_are_not_trimmed() {
        assert!(!skill_names_overlap("Go ", "Going"));
        assert!(skill_names_overlap("Go", "Going"));
    }

    #[test]
    fn test_empty_name_overlaps_everything() {
        assert!(skill_names_overlap("", "Guitare"));
        assert!(skill_names_overlap("Guitare", ""));
        assert!(!skill_names_overlap("Guitare", "   "));
    }

    #[test]
    fn test_overlapping_pairs_order() {
        let offered = vec![
            SkillTag::offered("Python", "Informatique", "Expert"),
            SkillTag::offered("Piano", "Musique", "Débutant"),
        ];
        let needed = vec![
            SkillTag::needed("Piano", "Musique"),
            SkillTag::needed("Python avancé", "Informatique"),
        ];

        let pairs: Vec<(&str, &str)> = overlapping_pairs(&offered, &needed)
            .map(|(o, n)| (o.name.as_str(), n.name.as_str()))
            .collect();

        assert_eq!(pairs, vec![("Python", "Python avancé"), ("Piano", "Piano")]);
    }

    #[test]
    fn test_eligibility() {
        let requester = create_test_profile(1, true);

        assert!(is_eligible_candidate(&create_test_profile(2, true), &requester));
        assert!(!is_eligible_candidate(&create_test_profile(2, false), &requester));
        assert!(!is_eligible_candidate(&create_test_profile(1, true), &requester));
    }
}
