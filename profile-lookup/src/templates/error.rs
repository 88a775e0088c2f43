//! Page painting error types.

/// Failure while painting a page.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Failed to paint page: {0}")]
    RenderError(#[from] handlebars::RenderError),
}
