//! Error types shared by the providers and the session layer.
//!
//! Input problems are reported as [`ValidationError`] before any provider is
//! called. Provider failures are tagged by kind so a caller can tell a missing
//! player from a throttled request. Nothing in the crate retries.

use thiserror::Error;

/// Rejected user input. Raised locally, no provider call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Region must not be empty")]
    EmptyRegion,

    #[error("Unknown region '{0}' (expected one of NA, EU, AP, KR, BR)")]
    UnknownRegion(String),

    #[error("Message must not be empty")]
    EmptyMessage,

    /// HenrikDev lookups need a Riot ID of the form `name#tag`
    #[error("Username '{0}' is missing a '#tag' suffix")]
    MissingTag(String),
}

/// Failure kinds a stats or coaching backend can report.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Player not found")]
    NotFound,

    /// Rate limiting encountered
    #[error("Rate limit exceeded. Retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request was not authorized (check the API key)")]
    Unauthorized,

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The payload parsed but did not contain what we need
    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    /// Create an invalid response error
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by [`crate::session`] operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A previous request from this session has not resolved yet
    #[error("A request is already in flight")]
    Busy,

    #[error("Provider request failed: {0}")]
    Provider(#[from] ProviderError),
}

impl SessionError {
    /// Short notice suitable for showing to the user.
    ///
    /// Validation problems are shown as-is; anything that went wrong after
    /// the provider was called collapses into a generic failure message.
    pub fn user_notice(&self) -> String {
        match self {
            SessionError::Validation(e) => e.to_string(),
            SessionError::Busy => "Please wait for the current reply".to_string(),
            SessionError::Provider(_) => "Failed to get a response. Please try again.".to_string(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
pub type SessionResult<T> = Result<T, SessionError>;
