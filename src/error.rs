use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LeagueError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },
    #[error("config error: {0}")]
    Config(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl LeagueError {
    pub fn not_found(what: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            what,
            key: key.to_string(),
        }
    }
}

impl From<StorageError> for LeagueError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LeagueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for LeagueError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for LeagueError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for LeagueError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
