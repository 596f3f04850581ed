use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    /// Empty graph, out-of-range parameter or unknown node.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed source {}: {source}", .path.display())]
    MalformedSource {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RankError>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(RankError::InvalidInput(msg.into()))
}
