//! Startup configuration errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("channel list is empty, nothing to display")]
    EmptyRegistry,
    #[error("duplicate channel id '{0}'")]
    DuplicateChannel(String),
    #[error("invalid config: {0}")]
    Parse(String),
}
