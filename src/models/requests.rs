use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: String,
}

/// Request to connect two users
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "connect_to_id", rename = "connectToId", default)]
    pub connect_to_id: String,
}

/// Query string for listing a user's connections
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListConnectionsQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

/// Query string for removing a connection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DisconnectQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "connectionId", default)]
    pub connection_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

/// Onboarding form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OnboardingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub year: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability: String,
    #[serde(rename = "linkedinURL", default)]
    pub linkedin_url: Option<String>,
}

/// Partial profile update; absent or empty fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub year: Option<String>,
    pub college: Option<String>,
    pub skills: Option<Vec<String>>,
    pub availability: Option<String>,
    #[serde(rename = "linkedinURL")]
    pub linkedin_url: Option<String>,
    #[serde(rename = "isOnboarded")]
    pub is_onboarded: Option<bool>,
}

/// Trim skill entries and drop the blank ones
pub fn clean_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
