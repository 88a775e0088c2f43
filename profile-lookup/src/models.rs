//! Wire models for the GitHub users API.
//!
//! Only the fields the page displays are modelled; everything else in the
//! response is ignored.

use serde::{Deserialize, Serialize};

/// A GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique account identifier.
    pub login: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub followers: u64,

    #[serde(default)]
    pub following: u64,

    #[serde(default)]
    pub public_repos: u64,

    #[serde(default)]
    pub location: Option<String>,

    /// Blog or homepage. GitHub returns an empty string when unset and does
    /// not require a scheme.
    #[serde(default)]
    pub blog: Option<String>,

    /// Account creation timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,

    /// Profile page on github.com.
    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub avatar_url: String,
}

/// A single entry from the `/users/{username}/repos` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub html_url: String,

    /// Star count; treated as zero when the field is missing.
    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    /// Primary language as detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,
}
