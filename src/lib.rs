//! Buddy Match - compatibility matching and connections for student collaborators
//!
//! This library provides the scoring and ranking engine that recommends
//! collaboration buddies, and the manager for the symmetric connections
//! users create from those recommendations.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ConnectionManager, CoreError, Matcher, MatchResult, skills_overlap};
pub use models::{UserProfile, Connection, ConnectionStatus, ScoredMatch, ScoringWeights, FindMatchesRequest, FindMatchesResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let own = vec!["js".to_string()];
        let other = vec!["javascript".to_string()];
        assert_eq!(skills_overlap(&own, &other), 1.0);
    }
}
