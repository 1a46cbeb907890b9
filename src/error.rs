use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqgatherError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote manifest fetch error (HTTP, network, timeout, etc.)
    #[error("Failed to fetch remote manifest: {0}")]
    RemoteFetchError(String),

    /// Output manifest could not be written durably
    #[error("Failed to write manifest '{path}': {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Manifest '{0}' is out of date")]
    CheckFailed(PathBuf),

    #[error("{0} conflicting declaration(s) found")]
    ConflictsFound(usize),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReqgatherError>;
