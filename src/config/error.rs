use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no configuration context provided")]
    MissingContext,

    #[error("invalid context: {0}")]
    InvalidContext(String),

    #[error("{0} not set")]
    MissingRootFolder(String),

    #[error("{0} not set")]
    MissingEnvironment(String),

    #[error("cannot reassign fixed config field '{0}'")]
    ImmutableWrite(String),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Only the byte index is kept; the offending line may hold a secret.
    #[error("failed to parse config file '{path}' at position {index}")]
    ParseError { path: PathBuf, index: usize },

    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
}
