//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration and credential errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The search window could not be computed.
    #[error(transparent)]
    Window(#[from] crate::window::WindowError),

    /// Client construction or repository search failed.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// The message template is invalid.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Publisher construction failed.
    #[error(transparent)]
    Publish(#[from] crate::publish::PublishError),

    /// The announcement history could not be loaded.
    #[error(transparent)]
    History(#[from] crate::history::HistoryError),
}
