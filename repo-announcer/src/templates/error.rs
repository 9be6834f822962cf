//! Message rendering error types.

/// Message rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template compilation error.
    #[error("Template registration error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),

    /// Message exceeds the post length limit even after shortening.
    #[error("Message is {length} characters long, limit is {limit}")]
    TooLong { length: usize, limit: usize },
}
