use crate::models::{UserProfile, ScoredMatch, ScoringWeights};
use crate::core::{filters::is_eligible_candidate, scoring::calculate_match_score};

/// Number of matches returned when no limit is configured
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Match engine: scores a candidate pool against a requester
///
/// # Pipeline Stages
/// 1. Eligibility (verified, not the requester)
/// 2. Scoring (skill overlap, country, rating)
/// 3. Positive-score filter
/// 4. Stable ranking and truncation
///
/// The engine is pure. It reads its inputs and allocates new results.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    limit: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        Self { weights, limit }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MATCH_LIMIT)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Compute the ranked matches of `requester` among `candidates`
    ///
    /// # Arguments
    /// * `requester` - Fully hydrated profile of the user asking for matches
    /// * `candidates` - Candidate pool, in the order that breaks score ties
    ///
    /// # Returns
    /// At most `limit` matches with a positive score, best first
    pub fn compute_matches(
        &self,
        requester: &UserProfile,
        candidates: &[UserProfile],
    ) -> Vec<ScoredMatch> {
        let mut scored: Vec<ScoredMatch> = candidates
            .iter()
            .filter(|candidate| is_eligible_candidate(candidate, requester))
            .filter_map(|candidate| {
                let (score, reasons) = calculate_match_score(requester, candidate, &self.weights);

                if score > 0.0 {
                    Some(ScoredMatch {
                        candidate: candidate.clone(),
                        score,
                        reasons,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable: equal scores keep pool order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.limit);

        tracing::debug!(
            "Scored {} candidates for user {}, keeping {}",
            candidates.len(),
            requester.id,
            scored.len()
        );

        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
