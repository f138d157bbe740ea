use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommitRankError>;

#[derive(Error, Debug)]
pub enum CommitRankError {
    #[error("Git error: {0}")]
    Git(String),
    #[error("git log failed in {repo} ({status}): {stderr}")]
    GitCommand {
        repo: String,
        status: String,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Config error: {0}")]
    Config(String),
}
