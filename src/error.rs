use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to access score file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize scores: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("failed to parse score file: {0}")]
    Deserialize(#[source] serde_yaml_ng::Error),
}

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal output failed: {0}")]
    Io(#[from] io::Error),
}
