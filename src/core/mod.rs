// Core algorithm exports
pub mod connections;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use connections::ConnectionManager;
pub use error::CoreError;
pub use filters::is_candidate;
pub use matcher::{Matcher, MatchResult};
pub use scoring::{availability_overlap, calculate_match_score, skills_overlap};
