// Unit tests for Buddy Match scoring and ranking

use buddy_match::core::{
    matcher::Matcher,
    scoring::{availability_overlap, calculate_match_score, skills_overlap},
};
use buddy_match::models::{ScoringWeights, UserProfile};

fn profile(id: &str, college: &str, year: &str, skills: &[&str], availability: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@example.edu", id),
        year: year.to_string(),
        college: college.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        availability: availability.to_string(),
        linkedin_url: None,
        is_onboarded: true,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_identical_profiles_score_100() {
    let a = profile("a", "MIT", "3", &["Rust", "Python", "ML"], "weekend afternoons");
    let b = profile("b", "MIT", "3", &["ml", "python", "rust"], "afternoon, weekdays");

    let weights = ScoringWeights::default();
    assert_eq!(calculate_match_score(&a, &b, &weights), 100);
    assert_eq!(calculate_match_score(&b, &a, &weights), 100);
}

#[test]
fn test_no_factor_matching_scores_zero_and_is_excluded() {
    let me = profile("me", "MIT", "3", &["rust"], "weekday evenings");
    let other = profile("other", "Caltech", "1", &["pottery"], "saturday mornings");

    assert_eq!(calculate_match_score(&me, &other, &ScoringWeights::default()), 0);

    let result = Matcher::with_default_weights().find_matches(&me, vec![other]);
    assert!(result.matches.is_empty());
}

#[test]
fn test_js_javascript_is_symmetric() {
    let me = profile("me", "MIT", "3", &["js"], "");
    let other = profile("other", "MIT", "3", &["javascript"], "");

    assert_eq!(skills_overlap(&me.skills, &other.skills), 1.0);
    assert_eq!(skills_overlap(&other.skills, &me.skills), 1.0);

    let weights = ScoringWeights::default();
    assert_eq!(
        calculate_match_score(&me, &other, &weights),
        calculate_match_score(&other, &me, &weights)
    );
}

#[test]
fn test_containment_can_be_asymmetric() {
    // "java" is contained in both candidate skills but counts once
    let me = profile("me", "X", "1", &["java"], "");
    let other = profile("other", "Y", "2", &["java", "javascript"], "");

    let weights = ScoringWeights::default();
    assert_eq!(calculate_match_score(&me, &other, &weights), 18); // 17.5 rounded
    assert_eq!(calculate_match_score(&other, &me, &weights), 35);
}

#[test]
fn test_pool_of_25_truncated_to_20_sorted() {
    let me = profile("me", "MIT", "3", &["rust", "go"], "evenings");

    let candidates: Vec<UserProfile> = (0..25)
        .map(|i| {
            let year = if i % 2 == 0 { "3" } else { "2" };
            let skills: &[&str] = if i % 3 == 0 { &["rust"] } else { &["rust", "go"] };
            profile(&format!("c{}", i), "MIT", year, skills, "weekend")
        })
        .collect();

    let result = Matcher::with_default_weights().find_matches(&me, candidates);

    assert_eq!(result.total_candidates, 25);
    assert_eq!(result.matches.len(), 20);
    for pair in result.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score, "Matches not sorted by score");
    }
}

#[test]
fn test_scenario_from_onboarding_fields() {
    let me = profile("me", "MIT", "3", &["Python", "ML"], "weekday evenings");
    let candidate = profile("c", "MIT", "2", &["python"], "weekend mornings");

    assert!(!availability_overlap(&me.availability, &candidate.availability));
    assert_eq!(calculate_match_score(&me, &candidate, &ScoringWeights::default()), 48);
}

#[test]
fn test_ineligible_candidates_skipped() {
    let me = profile("me", "MIT", "3", &["rust"], "");
    let mut not_onboarded = profile("a", "MIT", "3", &["rust"], "");
    not_onboarded.is_onboarded = false;
    let no_skills = profile("b", "MIT", "3", &[], "");

    let result = Matcher::default().find_matches(&me, vec![not_onboarded, no_skills, me.clone()]);

    assert!(result.matches.is_empty());
}
