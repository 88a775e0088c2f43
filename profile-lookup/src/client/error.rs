//! Lookup error types.

use thiserror::Error;

/// Errors that can occur while fetching a profile.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The user does not exist (HTTP 404).
    #[error("User '{login}' not found")]
    NotFound { login: String },

    /// The API rejected the request because of rate limiting (HTTP 403).
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Any other non-success response.
    #[error("GitHub API error ({status}): {message}")]
    Failed { status: u16, message: String },

    /// The request could not be sent or its body could not be read.
    #[error("GitHub API error: {0}")]
    Transport(#[from] octocrab::Error),

    /// The request URL could not be built.
    #[error("Invalid request URL for '{login}' under '{base}'")]
    InvalidUrl { login: String, base: String },

    /// The configured users endpoint is not a base URL.
    #[error("Invalid API base URL '{base}'")]
    InvalidBase { base: String },

    /// A success response did not match the expected shape.
    #[error("Failed to deserialize GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// User-facing classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    RateLimited,
    Generic,
}

impl FailureKind {
    /// Message shown in the status region.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotFound => "User not found. Please check the username.",
            Self::RateLimited => "API rate limit exceeded. Try again later.",
            Self::Generic => "Something went wrong. Please try again.",
        }
    }
}

impl LookupError {
    /// Returns the user-facing classification.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::RateLimited { .. } => FailureKind::RateLimited,
            _ => FailureKind::Generic,
        }
    }
}
