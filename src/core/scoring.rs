use crate::models::{ScoringWeights, UserProfile};

/// Keywords compared between two availability descriptions
pub const AVAILABILITY_KEYWORDS: [&str; 6] =
    ["morning", "afternoon", "evening", "night", "weekend", "weekday"];

/// Calculate a compatibility score (0-100) of `candidate` for `user`
///
/// Scoring formula (points, not fractions):
/// score = round(
///     college_match * 30 +        # exact, case-sensitive
///     year_match * 25 +           # exact
///     skills_overlap * 35 +       # fuzzy fraction, see `skills_overlap`
///     availability_match * 10     # any shared keyword
/// )
///
/// Factors are independent. A skipped factor contributes nothing, the
/// budget stays 100.
pub fn calculate_match_score(
    user: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> u8 {
    let mut points = 0.0;

    if candidate.college == user.college {
        points += weights.college;
    }

    if candidate.year == user.year {
        points += weights.year;
    }

    if !user.skills.is_empty() && !candidate.skills.is_empty() {
        points += skills_overlap(&user.skills, &candidate.skills) * weights.skills;
    }

    if !user.availability.is_empty() && !candidate.availability.is_empty()
        && availability_overlap(&user.availability, &candidate.availability)
    {
        points += weights.availability;
    }

    points.round().clamp(0.0, 100.0) as u8
}

/// Fraction (0-1) of `own` skills that loosely match one of `other`
///
/// Comparison is case-insensitive and a pair counts when either skill
/// contains the other, so "js" matches "javascript". The fraction is
/// taken over the larger of the two lists.
pub fn skills_overlap(own: &[String], other: &[String]) -> f64 {
    let denominator = own.len().max(other.len());
    if denominator == 0 {
        return 0.0;
    }

    let own: Vec<String> = own.iter().map(|s| s.to_lowercase()).collect();
    let other: Vec<String> = other.iter().map(|s| s.to_lowercase()).collect();

    let common = own
        .iter()
        .filter(|s| {
            other
                .iter()
                .any(|c| c.contains(s.as_str()) || s.contains(c.as_str()))
        })
        .count();

    common as f64 / denominator as f64
}

/// Whether both descriptions mention at least one common time keyword
pub fn availability_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    AVAILABILITY_KEYWORDS
        .iter()
        .any(|keyword| a.contains(keyword) && b.contains(keyword))
}
