//! CLI error types.

use pagepush_config::ConfigError;
use pagepush_confluence::publisher::{PublishError, WalkError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Walk(#[from] WalkError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Validation(String),
}
