// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Connection, ConnectionDetails, ConnectionStatus, ConnectionView, ProfileSummary, ScoredMatch,
    ScoringWeights, UserProfile,
};
pub use requests::{
    clean_skills, ConnectRequest, DisconnectQuery, FindMatchesRequest, ListConnectionsQuery,
    OnboardingRequest, UpdateProfileRequest,
};
pub use responses::{
    ConnectResponse, ConnectionsResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
    MessageResponse, UserResponse,
};
