#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod discovery;
pub mod filter;
pub mod history;
pub mod publish;
pub mod runner;
pub mod summary;
pub mod templates;
mod tls;
pub mod window;

pub use config::{twitter_credentials, twitter_credentials_from_env, ConfigError, Settings};
pub use discovery::{
    build_search_query, discover_candidates, CommitInfo, DiscoveryError, GitHubHost,
    RepositoryCandidate, RepositoryHost,
};
pub use filter::{CandidateFilter, Rejection};
pub use history::{AnnouncementHistory, HistoryError};
pub use publish::{
    DryRunPublisher, OAuthCredentials, PublishError, PublishedPost, Publisher, TwitterPublisher,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{FailureStage, ProcessingResult, RunSummary};
pub use templates::{truncate, MessageRenderer, TemplateError};
pub use window::{parse_duration, SearchWindow, WindowError};
