use crate::models::{UserProfile, ScoredMatch, ScoringWeights};
use crate::core::{filters::is_candidate, scoring::calculate_match_score};

/// Candidates scoring below this are dropped
pub const DEFAULT_MIN_SCORE: u8 = 15;

/// Maximum number of matches returned
pub const DEFAULT_LIMIT: usize = 20;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility re-check (self and incomplete profiles are skipped)
/// 2. Scoring
/// 3. Threshold filter
/// 4. Stable ranking by score and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: u8,
    limit: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            min_score: DEFAULT_MIN_SCORE,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Override the score threshold and result bound
    pub fn with_limits(mut self, min_score: u8, limit: usize) -> Self {
        self.min_score = min_score;
        self.limit = limit;
        self
    }

    /// Find the best collaboration matches for `user`
    ///
    /// # Arguments
    /// * `user` - The onboarded profile asking for matches
    /// * `candidates` - The candidate pool in scan order
    ///
    /// # Returns
    /// MatchResult with at most `limit` matches, highest score first.
    /// Equal scores keep the order in which candidates were scanned.
    pub fn find_matches(&self, user: &UserProfile, candidates: Vec<UserProfile>) -> MatchResult {
        let total_candidates = candidates.len();

        let mut scored_matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .filter(|profile| is_candidate(profile, &user.id))
            .filter_map(|profile| {
                let score = calculate_match_score(user, &profile, &self.weights);

                if score >= self.min_score {
                    Some(ScoredMatch {
                        profile: profile.summary(),
                        match_score: score,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stable: ties stay in scan order
        scored_matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        scored_matches.truncate(self.limit);

        tracing::debug!(
            "Scored {} of {} candidates for {}",
            scored_matches.len(),
            total_candidates,
            user.id
        );

        MatchResult {
            matches: scored_matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
