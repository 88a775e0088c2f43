//! Profile and repository fetching.
//!
//! [`ProfileSource`] is the seam the search controller talks to;
//! [`GitHubClient`] implements it over octocrab's raw request API so that
//! failure responses can be classified from their status and body.

mod error;

pub use error::{FailureKind, LookupError};

use crate::models::{Profile, RepositorySummary};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

/// Default users endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com/users";

/// Default number of repositories requested per profile.
pub const DEFAULT_REPOSITORY_PAGE_SIZE: u8 = 5;

/// Fetches profiles and their most recently updated repositories.
pub trait ProfileSource {
    /// Fetches the profile for `identifier`.
    fn fetch_profile(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Profile, LookupError>>;

    /// Fetches the most recently updated repositories for `identifier`.
    ///
    /// Failures degrade to an empty list; repository problems never block
    /// the profile from being shown.
    fn fetch_repositories(&self, identifier: &str) -> impl Future<Output = Vec<RepositorySummary>>;
}

/// Body of a GitHub error response. Only the message is used.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Unauthenticated GitHub users API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    api_base: Url,
    page_size: u8,
}

impl GitHubClient {
    /// Builds a client for the users endpoint at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if `api_base` is not a valid base URL or the
    /// HTTP client cannot be built.
    pub fn new(api_base: &str, page_size: u8) -> Result<Self, LookupError> {
        let invalid = || LookupError::InvalidBase {
            base: api_base.to_string(),
        };
        let api_base = Url::parse(api_base).map_err(|_| invalid())?;
        if api_base.cannot_be_a_base() {
            return Err(invalid());
        }

        // Every failure ends the search; nothing is retried.
        let octocrab = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .build()?;
        Ok(Self::with_octocrab(octocrab, api_base, page_size))
    }

    /// Wraps an existing octocrab instance.
    #[must_use]
    pub fn with_octocrab(octocrab: Octocrab, api_base: Url, page_size: u8) -> Self {
        Self {
            octocrab,
            api_base,
            page_size,
        }
    }

    /// Builds `{api_base}/{identifier}`.
    fn profile_url(&self, identifier: &str) -> Result<Url, LookupError> {
        user_url(&self.api_base, identifier, &[])
    }

    fn repositories_url(&self, identifier: &str) -> Result<Url, LookupError> {
        repositories_url(&self.api_base, identifier, self.page_size)
    }

    /// Issues a GET and returns the status code and body text.
    async fn get(&self, url: &Url) -> Result<(u16, String), LookupError> {
        let response = self.octocrab._get(url.as_str()).await?;
        let status = response.status().as_u16();
        let body = self.octocrab.body_to_string(response).await?;
        Ok((status, body))
    }
}

impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, identifier: &str) -> Result<Profile, LookupError> {
        let span = info_span!("fetch_profile", login = %identifier);

        async {
            let url = self.profile_url(identifier)?;
            debug!(url = %url, "Requesting profile");

            let (status, body) = self.get(&url).await?;
            if !is_success(status) {
                let error = classify_failure(identifier, status, &body);
                warn!(status, error = %error, "Profile request failed");
                return Err(error);
            }

            Ok(serde_json::from_str(&body)?)
        }
        .instrument(span)
        .await
    }

    async fn fetch_repositories(&self, identifier: &str) -> Vec<RepositorySummary> {
        let span = info_span!("fetch_repositories", login = %identifier);

        async {
            let url = match self.repositories_url(identifier) {
                Ok(url) => url,
                Err(e) => {
                    warn!(error = %e, "Failed to build repositories URL");
                    return Vec::new();
                }
            };
            debug!(url = %url, "Requesting repositories");

            let (status, body) = match self.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "Repositories request failed");
                    return Vec::new();
                }
            };

            if !is_success(status) {
                warn!(status, "Repositories request failed");
                return Vec::new();
            }

            match serde_json::from_str::<Vec<RepositorySummary>>(&body) {
                Ok(repositories) => {
                    debug!(count = repositories.len(), "Repositories fetched");
                    repositories
                }
                Err(e) => {
                    warn!(error = %e, "Failed to deserialize repositories");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Classifies a non-success profile response.
///
/// 404 is not-found; 403 whose message mentions "rate limit" in any case is
/// rate limiting; everything else is a generic failure. An unparsable body is
/// treated as an empty error object.
#[must_use]
pub fn classify_failure(identifier: &str, status: u16, body: &str) -> LookupError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .message
        .unwrap_or_default();

    match status {
        404 => LookupError::NotFound {
            login: identifier.to_string(),
        },
        403 if message.to_lowercase().contains("rate limit") => {
            LookupError::RateLimited { message }
        }
        _ => LookupError::Failed { status, message },
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Appends `identifier` and `rest` as path segments of `base`.
fn user_url(base: &Url, identifier: &str, rest: &[&str]) -> Result<Url, LookupError> {
    let invalid = || LookupError::InvalidUrl {
        login: identifier.to_string(),
        base: base.to_string(),
    };

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .push(identifier)
        .extend(rest);
    Ok(url)
}

/// Builds `{base}/{identifier}/repos?sort=updated&per_page={page_size}`.
fn repositories_url(base: &Url, identifier: &str, page_size: u8) -> Result<Url, LookupError> {
    let mut url = user_url(base, identifier, &["repos"])?;
    url.query_pairs_mut()
        .append_pair("sort", "updated")
        .append_pair("per_page", &page_size.to_string());
    Ok(url)
}
