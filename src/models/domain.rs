use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Student profile as held by the profile store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability: String,
    #[serde(rename = "linkedinURL", default)]
    pub linkedin_url: Option<String>,
    #[serde(rename = "isOnboarded", default)]
    pub is_onboarded: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A profile takes part in matching only once onboarding filled the
    /// fields the scorer relies on.
    pub fn is_eligible(&self) -> bool {
        self.is_onboarded
            && !self.year.trim().is_empty()
            && !self.college.trim().is_empty()
            && !self.skills.is_empty()
    }

    /// Display subset shared with other users
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            year: self.year.clone(),
            college: self.college.clone(),
            skills: self.skills.clone(),
            availability: self.availability.clone(),
            linkedin_url: self.linkedin_url.clone(),
        }
    }
}

/// Public fields of a profile, attached to matches and connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub year: String,
    pub college: String,
    pub skills: Vec<String>,
    pub availability: String,
    #[serde(rename = "linkedinURL")]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    /// Declared for a request/accept flow; connections are currently
    /// created accepted.
    Pending,
    Accepted,
}

/// Symmetric relationship between two profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    pub status: ConnectionStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Connection {
    /// New accepted connection initiated by `requester_id`
    pub fn accepted(requester_id: &str, receiver_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            requester_id: requester_id.to_string(),
            receiver_id: receiver_id.to_string(),
            status: ConnectionStatus::Accepted,
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.requester_id == user_id || self.receiver_id == user_id
    }

    /// True when this record joins `a` and `b`, in either direction
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.requester_id == a && self.receiver_id == b)
            || (self.requester_id == b && self.receiver_id == a)
    }

    /// Id of the participant that is not `user_id`
    pub fn other_party(&self, user_id: &str) -> &str {
        if self.requester_id == user_id {
            &self.receiver_id
        } else {
            &self.requester_id
        }
    }
}

/// Newly created connection with both participants resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDetails {
    pub id: String,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    pub status: ConnectionStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub requester: ProfileSummary,
    pub receiver: ProfileSummary,
}

/// A connection as seen from one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionView {
    pub id: String,
    pub user: ProfileSummary,
    #[serde(rename = "connectedSince")]
    pub connected_since: DateTime<Utc>,
    pub status: ConnectionStatus,
}

/// Scored match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub profile: ProfileSummary,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Points awarded per factor; the total budget is 100
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub college: f64,
    pub year: f64,
    pub skills: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            college: 30.0,
            year: 25.0,
            skills: 35.0,
            availability: 10.0,
        }
    }
}
