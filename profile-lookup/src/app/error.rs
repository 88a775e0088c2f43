//! Application error types.

/// Errors that can occur while setting up a lookup session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Client(#[from] crate::client::LookupError),

    /// Page painting errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),
}
